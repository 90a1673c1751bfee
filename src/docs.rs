// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_navigation,
        handlers::auth::logout,

        // --- Profiles ---
        handlers::profiles::create_profile,
        handlers::profiles::list_profiles,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_order_status,
        handlers::orders::list_feed_categories,

        // --- Targets ---
        handlers::targets::upsert_target,
        handlers::targets::list_targets,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::stream_production,

        // --- Inventory ---
        handlers::inventory::list_items,
        handlers::inventory::record_usage,
        handlers::inventory::list_usage,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::SessionView,
            models::auth::LoginResponse,

            // --- Profiles ---
            models::profile::Role,
            models::profile::NavItem,
            models::profile::Profile,
            models::profile::CreateProfilePayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::FeedCategory,
            models::order::Order,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderStatusPayload,

            // --- Targets ---
            models::target::Target,
            models::target::UpsertTargetPayload,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::InventoryLevel,
            models::inventory::InventoryUsage,
            models::inventory::RecordUsagePayload,

            // --- Dashboard ---
            models::dashboard::OrderAggregate,
            models::dashboard::DistrictAggregate,
            models::dashboard::SalesChartEntry,
            models::dashboard::Progress,
            models::dashboard::MemberProgress,
            models::dashboard::OwnerDashboard,
            models::dashboard::MarketingDashboard,
            models::dashboard::PersonalDashboard,
            models::dashboard::ProductionDashboard,
            models::dashboard::RoleDashboard,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Sessão e Navegação do Usuário"),
        (name = "Profiles", description = "Cadastro de Perfis (dono)"),
        (name = "Orders", description = "Pedidos de Ração"),
        (name = "Targets", description = "Metas Mensais"),
        (name = "Inventory", description = "Estoque da Produção"),
        (name = "Dashboard", description = "Painéis por Cargo")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/users/me/navigation",
            "/api/orders/{id}",
            "/api/orders/{id}/status",
            "/api/targets",
            "/api/dashboard/production/stream",
            "/api/inventory/usage",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltou {path}");
        }
    }
}
