use klarna_checkout::application::checkout::CheckoutOutcome;
use klarna_checkout::domain::consent::ConsentType;
use klarna_checkout::domain::order::{AddressPatch, OrderPatch, RequestOptions};
use klarna_checkout::domain::payment::{Channel, PaymentResources};
use klarna_checkout::infrastructure::in_memory::ServiceCall;

mod common;

#[tokio::test]
async fn test_end_to_end_renders_klarna_widget() {
    let (checkout, storefront) = common::checkout(common::scenario());

    let run = checkout.initialize().await;

    assert_eq!(
        run.outcome,
        CheckoutOutcome::Rendered {
            session_id: "sess-1".to_string()
        }
    );
    assert_eq!(run.context.session_id.as_deref(), Some("sess-1"));
    assert_eq!(run.context.locale.unwrap().as_str(), "en-US");

    let calls = storefront.calls().await;
    assert_eq!(
        common::names(&calls),
        vec![
            "getLocale",
            "getDraftOrder",
            "getAppConfiguration",
            "getConsents",
            "updateOrder",
            "calculateCost",
            "getActiveConfigurations",
            "initiate",
            "loadResources",
            "renderHtml",
        ]
    );

    assert_eq!(
        calls[5],
        ServiceCall::CalculateCost {
            order_id: "123".to_string(),
            patch: OrderPatch::shipping_address(AddressPatch {
                city: Some("X".to_string()),
                state: Some("Y".to_string()),
                zip: Some("Z".to_string()),
                country: Some("US".to_string()),
            }),
            options: RequestOptions::with_order_lines(),
        }
    );
    assert_eq!(
        calls[6],
        ServiceCall::GetActiveConfigurations {
            division_id: "div-1".to_string()
        }
    );

    let ServiceCall::Initiate { request } = &calls[7] else {
        panic!("expected initiate, got {:?}", calls[7]);
    };
    assert_eq!(request.account_id, "acc1");
    assert_eq!(request.order_id, "123");
    assert_eq!(
        request.result_url,
        "https://shop.example.com/en-US/redirect-result/checkout"
    );
    assert_eq!(request.cancel_url, request.result_url);
    assert_eq!(request.channel, Channel::Browser);
    assert!(request.browser_info.java_script_enabled);
    assert_eq!(request.browser_info.java_enabled, Some(false));
    assert_eq!(request.browser_info.color_depth, Some(24));
    assert_eq!(request.browser_info.timezone_offset, 300);
    assert_eq!(
        request.browser_info.origin_url.as_deref(),
        Some("https://shop.example.com")
    );

    assert_eq!(
        calls[8],
        ServiceCall::LoadResources {
            resources: PaymentResources {
                scripts: vec!["https://js.klarna.example/kco.js".to_string()],
                styles: vec!["https://js.klarna.example/kco.css".to_string()],
            }
        }
    );
    assert_eq!(
        storefront.rendered("paymentMethodContainer").await.as_deref(),
        Some("<div id=\"klarna-checkout-container\"></div>")
    );
}

#[tokio::test]
async fn test_empty_cart_returns_to_cart_without_payment_calls() {
    let mut scenario = common::scenario();
    scenario.draft_order = None;
    let (checkout, storefront) = common::checkout(scenario);

    let run = checkout.initialize().await;

    assert_eq!(run.outcome, CheckoutOutcome::EmptyCart);
    let calls = storefront.calls().await;
    assert_eq!(
        calls,
        vec![
            ServiceCall::GetLocale,
            ServiceCall::GetDraftOrder,
            ServiceCall::Navigate {
                path: "en-US/cart".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_missing_gateway_returns_to_cart_without_initiate() {
    let mut scenario = common::scenario();
    scenario
        .payment_configurations
        .retain(|config| config.gateway_provider_name != "klarna-checkout");
    let (checkout, storefront) = common::checkout(scenario);

    let run = checkout.initialize().await;

    assert_eq!(run.outcome, CheckoutOutcome::GatewayUnavailable);
    let calls = storefront.calls().await;
    assert_eq!(common::count(&calls, "initiate"), 0);
    assert_eq!(common::count(&calls, "alert"), 0);
    assert_eq!(common::count(&calls, "debugLog"), 0);
    assert_eq!(
        calls.last(),
        Some(&ServiceCall::Navigate {
            path: "en-US/cart".to_string()
        })
    );
}

#[tokio::test]
async fn test_no_shipping_address_skips_cost_calculation() {
    let mut scenario = common::scenario();
    if let Some(order) = scenario.draft_order.as_mut() {
        order.shipping_address = None;
    }
    let (checkout, storefront) = common::checkout(scenario);

    let run = checkout.initialize().await;

    assert!(matches!(run.outcome, CheckoutOutcome::Rendered { .. }));
    let calls = storefront.calls().await;
    assert_eq!(common::count(&calls, "calculateCost"), 0);
    assert_eq!(common::count(&calls, "initiate"), 1);
}

#[tokio::test]
async fn test_consent_update_keeps_only_order_consents() {
    let (checkout, storefront) = common::checkout(common::scenario());

    checkout.initialize().await;

    let calls = storefront.calls().await;
    let update = calls
        .iter()
        .find_map(|call| match call {
            ServiceCall::UpdateOrder {
                order_id,
                patch,
                options,
            } => Some((order_id.clone(), patch.clone(), *options)),
            _ => None,
        })
        .expect("order was updated");

    assert_eq!(update.0, "123");
    assert_eq!(update.2, RequestOptions::with_order_lines());
    let types: Vec<ConsentType> = update
        .1
        .consent
        .expect("consent patch")
        .iter()
        .map(|consent| consent.consent_template_type)
        .collect();
    assert_eq!(types, vec![ConsentType::PpAndTos, ConsentType::NextSell]);

    let order = storefront.current_order().await.unwrap();
    assert_eq!(order.consent.len(), 2);
}

#[tokio::test]
async fn test_absent_consents_send_no_consent_field() {
    let mut scenario = common::scenario();
    scenario.consents = None;
    let (checkout, storefront) = common::checkout(scenario);

    checkout.initialize().await;

    let calls = storefront.calls().await;
    let patch = calls.iter().find_map(|call| match call {
        ServiceCall::UpdateOrder { patch, .. } => Some(patch.clone()),
        _ => None,
    });
    assert_eq!(patch, Some(OrderPatch::default()));
}

#[tokio::test]
async fn test_empty_initiate_response_stops_silently() {
    let mut scenario = common::scenario();
    scenario.init_response = None;
    let (checkout, storefront) = common::checkout(scenario);

    let run = checkout.initialize().await;

    assert_eq!(run.outcome, CheckoutOutcome::NoPaymentSession);
    assert!(run.context.session_id.is_none());
    let calls = storefront.calls().await;
    assert_eq!(calls.last().map(ServiceCall::name), Some("initiate"));
    assert_eq!(common::count(&calls, "navigate"), 0);
    assert_eq!(common::count(&calls, "alert"), 0);
}

#[tokio::test]
async fn test_missing_base_uri_yields_relative_result_url() {
    let mut scenario = common::scenario();
    scenario.base_uri = None;
    let (checkout, storefront) = common::checkout(scenario);

    checkout.initialize().await;

    let calls = storefront.calls().await;
    let url = calls.iter().find_map(|call| match call {
        ServiceCall::Initiate { request } => Some(request.result_url.clone()),
        _ => None,
    });
    assert_eq!(url.as_deref(), Some("en-US/redirect-result/checkout"));
}
