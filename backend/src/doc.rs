//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the domain
//! schemas they exchange and the session cookie security scheme. The document
//! backs Swagger UI in debug builds and is exported by the `openapi-dump`
//! binary for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AdminOverview, AdminRole, AdminUser, DashboardTotals, Error, ErrorCode, IdentityCard,
    MonthlyRegistrations, RegistrationField, RegistrationFieldsUpdate, RegistrationForm,
    RegistrationWizard, SupportRequestRecord, SupportStatus, Worker, WorkerDashboard,
    WorkerStatus,
};
use crate::inbound::http::auth::{
    AdminLoginRequest, OtpNotice, OtpRequest, WorkerLoginRequest, WorkerSession,
};
use crate::inbound::http::dashboard::NewSupportRequestBody;
use crate::inbound::http::registration::{PhotoRequest, SubmitRequest, SubmitResponse};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::support::SupportRequestUpdate;
use crate::inbound::http::workers::WorkerStatusUpdate;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by the admin and worker login endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Migii backend API",
        description = "Worker registration, OTP login, admin dashboards and public ID verification.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::admin_login,
        crate::inbound::http::auth::request_worker_otp,
        crate::inbound::http::auth::worker_login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::registration::get_registration,
        crate::inbound::http::registration::reset_registration,
        crate::inbound::http::registration::update_fields,
        crate::inbound::http::registration::attach_photo,
        crate::inbound::http::registration::next_step,
        crate::inbound::http::registration::prev_step,
        crate::inbound::http::registration::send_registration_otp,
        crate::inbound::http::registration::submit_registration,
        crate::inbound::http::workers::list_workers,
        crate::inbound::http::workers::get_worker,
        crate::inbound::http::workers::update_worker,
        crate::inbound::http::workers::delete_worker,
        crate::inbound::http::support::list_support_requests,
        crate::inbound::http::support::update_support_request,
        crate::inbound::http::support::resolve_support_request,
        crate::inbound::http::dashboard::admin_overview,
        crate::inbound::http::dashboard::worker_dashboard,
        crate::inbound::http::dashboard::create_support_request,
        crate::inbound::http::verify::verify_worker,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Worker,
        WorkerStatus,
        AdminUser,
        AdminRole,
        SupportRequestRecord,
        SupportStatus,
        RegistrationWizard,
        RegistrationForm,
        RegistrationField,
        RegistrationFieldsUpdate,
        AdminOverview,
        DashboardTotals,
        MonthlyRegistrations,
        WorkerDashboard,
        IdentityCard,
        AdminLoginRequest,
        OtpRequest,
        OtpNotice,
        WorkerLoginRequest,
        WorkerSession,
        PhotoRequest,
        SubmitRequest,
        SubmitResponse,
        WorkerStatusUpdate,
        SupportRequestUpdate,
        NewSupportRequestBody,
    )),
    tags(
        (name = "auth", description = "Admin and worker sign-in"),
        (name = "registration", description = "Three-step worker registration wizard"),
        (name = "workers", description = "Admin worker management"),
        (name = "support", description = "Admin support desk"),
        (name = "dashboard", description = "Admin and worker dashboards"),
        (name = "verify", description = "Public identity verification"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema<'a>(doc: &'a utoipa::openapi::OpenApi, suffix: &str) -> &'a RefOr<Schema> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        schemas
            .iter()
            .find(|(name, _)| name.rsplit(['.', ':']).next() == Some(suffix))
            .map(|(_, schema)| schema)
            .unwrap_or_else(|| panic!("{suffix} schema registered"))
    }

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/auth/admin/login")]
    #[case("/api/v1/registration/submit")]
    #[case("/api/v1/workers/{id}")]
    #[case("/api/v1/support-requests/{id}/resolve")]
    #[case("/api/v1/admin/overview")]
    #[case("/api/v1/verify/{uniqueId}")]
    #[case("/health/ready")]
    fn documents_every_route_family(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("Error", "traceId")]
    #[case("Worker", "uniqueId")]
    #[case("IdentityCard", "originState")]
    #[case("SupportRequestRecord", "resolvedAt")]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        assert_object_schema_has_field(schema(&doc, name), field);
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
