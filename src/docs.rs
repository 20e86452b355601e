use utoipa::OpenApi;

use gsms_core::ErrorResponse;
use gsms_models::{
    DashboardResponse, LoginForm, NavItem, ParentSummary, ParentsResponse, RegisterForm,
    RoleClaim, RoleLoginForm, SessionResponse, StaffResponse, StaffSummary, StudentSummary,
    StudentsResponse, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::login_with_role,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::logout,
        crate::modules::dashboard::controller::get_session,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::students::controller::get_students,
        crate::modules::staff::controller::get_staff,
        crate::modules::parents::controller::get_parents,
    ),
    components(
        schemas(
            LoginForm,
            RoleLoginForm,
            RegisterForm,
            RoleClaim,
            UserRole,
            SessionResponse,
            DashboardResponse,
            NavItem,
            StudentSummary,
            StudentsResponse,
            StaffSummary,
            StaffResponse,
            ParentSummary,
            ParentsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Sign-in, role-scoped sign-in, sign-up and sign-out"),
        (name = "Session", description = "The signed-in caller and the dashboard shell"),
        (name = "Records", description = "Student, staff and parent listings")
    ),
    info(
        title = "GSMS API",
        version = "0.1.0",
        description = "Ghana School Management System backend. Sessions are carried in an HTTP-only cookie set by the sign-in endpoints."
    )
)]
pub struct ApiDoc;
