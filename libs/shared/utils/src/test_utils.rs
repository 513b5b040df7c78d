use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Role, Session};

pub const TEST_REGION: &str = "us-east-2";
pub const TEST_POOL_ID: &str = "us-east-2_TestPool";
pub const TEST_CLIENT_ID: &str = "test-client-id";

pub struct TestConfig {
    pub jwt_secret: String,
    pub backend_url: String,
    pub identity_endpoint: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            backend_url: "http://localhost:8000".to_string(),
            identity_endpoint: "http://localhost:9229".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_backend(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_base_url: self.backend_url.clone(),
            region: TEST_REGION.to_string(),
            user_pool_id: TEST_POOL_ID.to_string(),
            client_id: TEST_CLIENT_ID.to_string(),
            identity_pool_id: "us-east-2:test-identity-pool".to_string(),
            maps_api_key: "test-maps-key".to_string(),
            session_jwt_secret: self.jwt_secret.clone(),
            identity_endpoint: self.identity_endpoint.clone(),
            login_url: "/".to_string(),
            landing_path: "/dashboard".to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub group: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("staff@example.com", "HealthcareFacilityStaff")
    }
}

impl TestUser {
    pub fn new(email: &str, group: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            group: group.to_string(),
        }
    }

    pub fn appointments_admin() -> Self {
        Self::new("appointments@example.com", "AppointmentsAdmin")
    }

    pub fn user_management_admin() -> Self {
        Self::new("users@example.com", "UserManagementAdmin")
    }

    pub fn operations_staff() -> Self {
        Self::new("ops@example.com", "HIRTAOperationsStaff")
    }

    pub fn facility_staff() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Role {
        Role::from(self.group.as_str())
    }

    pub fn to_session(&self, bearer_token: &str) -> Session {
        Session {
            bearer_token: bearer_token.to_string(),
            role: self.role(),
            subject: self.id.clone(),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "cognito:groups": [user.group],
            "iss": format!("https://cognito-idp.{}.amazonaws.com/{}", TEST_REGION, TEST_POOL_ID),
            "aud": TEST_CLIENT_ID,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        Self::sign_claims(&payload, secret)
    }

    /// Signs arbitrary claims, for tokens the helpers above cannot express.
    pub fn sign_claims(payload: &serde_json::Value, secret: &str) -> String {
        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }

    /// Cookie header value carrying a full session for `user`.
    pub fn session_cookie(user: &TestUser, secret: &str) -> String {
        let id_token = Self::create_test_token(user, secret, Some(1));
        format!("ehr_access_token=access-{}; ehr_id_token={}", user.id, id_token)
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn patient(patient_id: &str, name: &str) -> serde_json::Value {
        json!({
            "patient_id": patient_id,
            "name": name,
            "via_rider_id": format!("rider-{}", patient_id),
            "provider": "epic"
        })
    }

    pub fn appointment_summary(id: &str, patient_name: &str, start: &str, end: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient_name": patient_name,
            "start_time": start,
            "end_time": end,
            "location": "Clinic A",
            "status": "Scheduled"
        })
    }

    pub fn appointment_detail(id: &str, patient_id: &str, patient_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient_id": patient_id,
            "patient_name": patient_name,
            "start_time": "2024-03-01T15:00:00.000000+0000",
            "end_time": "2024-03-01T15:30:00.000000+0000",
            "location": "Clinic A",
            "status": "Scheduled",
            "provider": "epic"
        })
    }

    pub fn dashboard_record(patient_name: &str, ride: serde_json::Value) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "patient_id": "42",
            "patient_name": patient_name,
            "start_time": "2024-03-01T15:00:00.000000+0000",
            "end_time": "2024-03-01T15:30:00.000000+0000",
            "location": "Clinic A",
            "status": "Scheduled",
            "provider": "epic",
            "ride": ride
        })
    }

    pub fn full_ride() -> serde_json::Value {
        json!({
            "trip_status": "Scheduled",
            "pickup_eta": 1_709_302_500,
            "dropoff_eta": 1_709_304_300,
            "driver_info": { "first_name": "Sam", "last_name": "Driver" },
            "vehicle_info": { "license_plate": "ABC-123" },
            "pickup": { "address": "1 Main St", "notes": "Ring bell" },
            "dropoff": { "address": "Clinic A", "notes": "Side door" }
        })
    }

    pub fn setting(name: &str, value: &str) -> serde_json::Value {
        json!({ "name": name, "value": value })
    }
}
