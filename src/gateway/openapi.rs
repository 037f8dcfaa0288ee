//! OpenAPI document aggregation for the Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::checkout::service::{
    CardAttachRequest, CardTokenRequest, CustomerRequest, DlocalPaymentRequest,
    DlocalPaymentResponse, DlocalWebhook, MpWebhook, MpWebhookData, PreferenceItem,
    PreferenceRequest, PreferenceResponse,
};
use crate::flavours::service::{Flavour, FlavourGroup, FlavourGroupInput, FlavourInput};
use crate::gateway::types::StatusResponse;
use crate::menu::service::{AssociationInput, MenuFlavourRow, MenuItem, MenuItemInput};
use crate::orders::service::{Order, OrderCreated, OrderInput, OrderStatusInput};
use crate::users::service::{
    Address, AddressInput, AddressUpdate, GoogleSignupRequest, LoginRequest, LoginResponse,
    SignupRequest, User,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nostra Pizza API",
        description = "Pizza-ordering backend: menu, flavours, orders, users and checkout",
        version = "0.1.0"
    ),
    paths(
        crate::gateway::health,
        crate::menu::handlers::list_menu,
        crate::menu::handlers::create_menu_item,
        crate::menu::handlers::update_menu_item,
        crate::menu::handlers::delete_menu_item,
        crate::menu::handlers::menu_flavours,
        crate::menu::handlers::add_menu_flavours,
        crate::menu::handlers::replace_menu_flavours,
        crate::flavours::handlers::list_flavours,
        crate::flavours::handlers::create_flavour,
        crate::flavours::handlers::update_flavour,
        crate::flavours::handlers::delete_flavour,
        crate::flavours::handlers::list_groups,
        crate::flavours::handlers::create_group,
        crate::flavours::handlers::update_group,
        crate::flavours::handlers::delete_group,
        crate::orders::handlers::create_order,
        crate::orders::handlers::list_orders,
        crate::orders::handlers::get_order,
        crate::orders::handlers::update_order_status,
        crate::orders::handlers::delete_order,
        crate::users::handlers::login,
        crate::users::handlers::signup,
        crate::users::handlers::signup_google,
        crate::users::handlers::list_users,
        crate::users::handlers::get_user,
        crate::users::handlers::get_user_by_google_id,
        crate::users::handlers::list_addresses,
        crate::users::handlers::create_address,
        crate::users::handlers::update_address,
        crate::users::handlers::delete_address,
        crate::checkout::handlers::create_card_token,
        crate::checkout::handlers::create_customer,
        crate::checkout::handlers::attach_card,
        crate::checkout::handlers::create_preference,
        crate::checkout::handlers::mp_webhook,
        crate::checkout::handlers::create_dlocal_payment,
        crate::checkout::handlers::dlocal_webhook,
    ),
    components(schemas(
        StatusResponse,
        MenuItem,
        MenuItemInput,
        MenuFlavourRow,
        AssociationInput,
        Flavour,
        FlavourInput,
        FlavourGroup,
        FlavourGroupInput,
        Order,
        OrderInput,
        OrderStatusInput,
        OrderCreated,
        User,
        LoginRequest,
        LoginResponse,
        SignupRequest,
        GoogleSignupRequest,
        Address,
        AddressInput,
        AddressUpdate,
        CardTokenRequest,
        CustomerRequest,
        CardAttachRequest,
        PreferenceItem,
        PreferenceRequest,
        PreferenceResponse,
        DlocalPaymentRequest,
        DlocalPaymentResponse,
        MpWebhook,
        MpWebhookData,
        DlocalWebhook,
    )),
    tags(
        (name = "Menu", description = "Menu items and flavour associations"),
        (name = "Flavours", description = "Flavours and flavour groups"),
        (name = "Orders", description = "Customer orders"),
        (name = "Users", description = "Signup, login and saved addresses"),
        (name = "Checkout", description = "Payment-processor pass-through and webhooks"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/checkout/mp/webhook"));
        assert!(json.contains("/menu/flavours/{id}"));
    }
}
