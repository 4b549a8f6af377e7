//! Pieces shared by every crate in the workspace: logging setup and the
//! small response types that are not owned by any single layer.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn error_body_serializes_code() {
        let body = types::ErrorBody::new("user already exists", 1002);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "user already exists");
        assert_eq!(json["code"], 1002);
    }
}
