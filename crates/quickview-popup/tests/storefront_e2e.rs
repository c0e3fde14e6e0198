//! End-to-end: `QuickView` driving a real `StorefrontClient` against a
//! `wiremock` storefront.

use quickview_core::OptionSet;
use quickview_popup::{
    LoadOutcome, QuickView, QuickViewError, QuickViewOptions, SubmitOutcome, Surface, Visibility,
};
use quickview_storefront::{StorefrontClient, StorefrontError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct PageSurface {
    displayed: bool,
    title: String,
    price: String,
    selectors: Vec<OptionSet>,
    variant_field: Option<String>,
    cart_count: Option<u32>,
    notification: Option<String>,
}

impl Surface for PageSurface {
    fn show_modal(&mut self) {
        self.displayed = true;
    }
    fn hide_modal(&mut self) {
        self.displayed = false;
    }
    fn set_active(&mut self, _active: bool) {}
    fn focus_close_control(&mut self) {}
    fn set_scroll_locked(&mut self, _locked: bool) {}
    fn set_title(&mut self, text: &str) {
        text.clone_into(&mut self.title);
    }
    fn set_price(&mut self, text: &str) {
        text.clone_into(&mut self.price);
    }
    fn set_image(&mut self, _src: &str, _alt: &str) {}
    fn clear_image(&mut self) {}
    fn set_description_html(&mut self, _html: &str) {}
    fn clear_description(&mut self) {}
    fn render_selectors(&mut self, option_sets: &[OptionSet]) {
        self.selectors = option_sets.to_vec();
    }
    fn clear_selectors(&mut self) {
        self.selectors.clear();
    }
    fn has_variant_id_field(&self) -> bool {
        self.variant_field.is_some()
    }
    fn create_variant_id_field(&mut self, variant_id: &str) {
        self.variant_field = Some(variant_id.to_owned());
    }
    fn set_variant_id_field(&mut self, variant_id: &str) {
        self.variant_field = Some(variant_id.to_owned());
    }
    fn set_cart_count(&mut self, count: u32) {
        self.cart_count = Some(count);
    }
    fn show_notification(&mut self, title: &str) {
        self.notification = Some(title.to_owned());
    }
}

fn popup(server: &MockServer, options: QuickViewOptions) -> QuickView<PageSurface, StorefrontClient> {
    let client = StorefrontClient::new(&server.uri(), 5, "quickview-test/0.1", 0, 0)
        .expect("failed to build test StorefrontClient");
    QuickView::new(PageSurface::default(), client, options)
}

async fn mount_blue_shirt(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products/blue-shirt.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Blue Shirt",
            "handle": "blue-shirt",
            "price": 2500,
            "images": [],
            "options": [{"name": "Size", "position": 1, "values": ["Small", "Large"]}],
            "variants": [
                {"id": 1, "title": "Small", "option1": "Small", "price": 2500},
                {"id": 2, "title": "Large", "option1": "Large", "price": 2900}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn selected_variant_is_posted_to_cart() {
    let server = MockServer::start().await;
    mount_blue_shirt(&server).await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(body_string_contains("id=2"))
        .and(body_string_contains("quantity=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "variant_id": 2, "quantity": 1, "title": "Blue Shirt - Large", "price": 2900
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item_count": 3, "total_price": 8700, "items": []
        })))
        .mount(&server)
        .await;

    let qv = popup(
        &server,
        QuickViewOptions {
            cart_notifications: true,
            ..QuickViewOptions::default()
        },
    );

    assert_eq!(qv.load("blue-shirt").await.unwrap(), LoadOutcome::Shown);
    qv.with_surface(|s| {
        assert!(s.displayed);
        assert_eq!(s.selectors[0].values, vec!["Small", "Large"]);
        assert_eq!(s.variant_field.as_deref(), Some("1"));
    });

    qv.select_option("Size", "Large");
    qv.with_surface(|s| {
        assert_eq!(s.variant_field.as_deref(), Some("2"));
        assert_eq!(s.price, "$29.00");
    });

    let outcome = qv.submit().await.expect("expected add to succeed");
    assert!(matches!(outcome, SubmitOutcome::Added(ref item) if item.variant_id == 2));
    assert_eq!(qv.visibility(), Visibility::Closing);
    qv.with_surface(|s| {
        assert_eq!(s.notification.as_deref(), Some("Blue Shirt"));
        assert_eq!(s.cart_count, Some(3));
    });
}

#[tokio::test]
async fn server_error_on_load_shows_error_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/broken.js"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let qv = popup(&server, QuickViewOptions::default());
    let err = qv.load("broken").await.unwrap_err();

    assert!(
        matches!(
            err,
            QuickViewError::Load {
                source: StorefrontError::UnexpectedStatus { status: 500, .. },
                ..
            }
        ),
        "expected Load(UnexpectedStatus 500), got: {err:?}"
    );
    assert_eq!(qv.visibility(), Visibility::Closed);
    qv.with_surface(|s| {
        assert_eq!(s.title, "Error loading product");
        assert!(!s.displayed);
    });
}

#[tokio::test]
async fn rejected_add_keeps_popup_open() {
    let server = MockServer::start().await;
    mount_blue_shirt(&server).await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422, "message": "Cart Error", "description": "All 1 Blue Shirt are in your cart."
        })))
        .mount(&server)
        .await;

    let qv = popup(&server, QuickViewOptions::default());
    qv.load("blue-shirt").await.unwrap();

    let err = qv.submit().await.unwrap_err();

    assert!(
        matches!(err, QuickViewError::AddToCart { variant_id: 1, .. }),
        "expected AddToCart, got: {err:?}"
    );
    assert_eq!(qv.visibility(), Visibility::Open);
}
