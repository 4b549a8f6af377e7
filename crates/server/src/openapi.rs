use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Popescu")]
    pub last_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub pass: String,
    #[schema(example = "1990-04-12")]
    pub birthday: String,
    #[schema(example = "Main street 12")]
    pub address: String,
    #[schema(example = "0712345678")]
    pub phone: String,
    pub technologies: Vec<String>,
}

#[derive(ToSchema)]
pub struct RegisterResponse { pub uid: i32 }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub pass: String }

#[derive(ToSchema)]
pub struct LoginResponse {
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub expires_in: u64,
    pub uid: i32,
    pub email: String,
    #[schema(example = "USER")]
    pub role: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserProfileDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: String,
    pub role: String,
    pub address: String,
    pub phone: String,
    pub technologies: Vec<String>,
}

#[derive(ToSchema)]
pub struct TechnologyDoc { pub id: i32, pub name: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::users::me,
        crate::routes::users::technologies,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UserProfileDoc,
            TechnologyDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        for p in ["/", "/register", "/login", "/users/me", "/technologies"] {
            assert!(doc.paths.paths.contains_key(p), "missing path {p}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
