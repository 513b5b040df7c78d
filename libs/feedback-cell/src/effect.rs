use std::time::Duration;

/// What the page does once a component has finished reacting to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Stay,
    /// Full page reload once the result banner has been up for `after`.
    Reload { after: Duration },
}

impl PageEffect {
    pub fn is_reload(&self) -> bool {
        matches!(self, PageEffect::Reload { .. })
    }
}
