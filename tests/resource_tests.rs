//! Integration tests for the resource adapters.
//!
//! Each test mounts the endpoints one adapter operation uses and checks the
//! requests it makes and the values it decodes.

use bigcommerce_api::rest::resources::{
    Checkout, GiftCertificate, Product, ProductInventory, TaxClassRate, TaxZone, Variant,
    VariantInventory, VariantSalePrice,
};
use bigcommerce_api::{
    AccessToken, ApiError, BigCommerceConfig, CollectionResource, HostUrl, QueryArgs, RestClient,
    StoreHash,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RestClient {
    let config = BigCommerceConfig::builder()
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config)
}

fn single_page(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": data,
        "meta": {"pagination": {"current_page": 1, "total_pages": 1}}
    }))
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_find_detailed_includes_sub_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products/42"))
        .and(query_param(
            "include",
            "variants,images,custom_fields,bulk_pricing_rules,primary_image,modifiers,options,videos",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 42,
                "name": "Shirt",
                "variants": [{"id": 7, "product_id": 42, "sku": "SHIRT-1-RED"}],
                "images": [{"id": 3, "is_thumbnail": true}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let product = Product::find_detailed(&client, 42).await.unwrap();

    assert_eq!(product.name.as_deref(), Some("Shirt"));
    assert_eq!(product.variants.unwrap()[0].id, Some(7));
    assert_eq!(product.images.unwrap()[0].is_thumbnail, Some(true));
}

#[tokio::test]
async fn test_product_not_found_names_the_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Product::find(&client, 99, &QueryArgs::new()).await.unwrap_err();

    assert_eq!(error.to_string(), "Product 99 not found");
}

#[tokio::test]
async fn test_product_create_rejected_sku() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .and(body_partial_json(json!({"sku": "SHIRT-1", "type": "physical"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "title": "The product was not valid.",
            "errors": {"sku": "already exists"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let product = Product {
        name: Some("Shirt".to_string()),
        product_type: Some("physical".to_string()),
        sku: Some("SHIRT-1".to_string()),
        ..Default::default()
    };
    let error = Product::create(&client, &product).await.unwrap_err();

    assert!(matches!(error, ApiError::Validation(_)));
    assert_eq!(error.to_string(), "already exists");
}

#[tokio::test]
async fn test_product_update_by_sku() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .and(query_param("sku", "SHIRT-1"))
        .respond_with(single_page(json!([{"id": 42, "sku": "SHIRT-1"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/42"))
        .and(body_json(json!({"sku": "SHIRT-1", "price": 24.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 42, "sku": "SHIRT-1", "price": 24.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = Product {
        sku: Some("SHIRT-1".to_string()),
        price: Some(24.5),
        ..Default::default()
    };
    let product = Product::update_by_sku(&client, &update).await.unwrap();

    assert_eq!(product.id, Some(42));
}

#[tokio::test]
async fn test_product_update_by_unknown_sku() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .respond_with(single_page(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = Product {
        sku: Some("SHIRT-9".to_string()),
        ..Default::default()
    };
    let error = Product::update_by_sku(&client, &update).await.unwrap_err();

    assert_eq!(error.to_string(), "Product SHIRT-9 not found");
}

#[tokio::test]
async fn test_product_update_by_sku_surfaces_lookup_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .and(query_param("sku", "SHIRT-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = Product {
        sku: Some("SHIRT-1".to_string()),
        ..Default::default()
    };
    let error = tokio_test::assert_err!(Product::update_by_sku(&client, &update).await);

    assert!(matches!(error, ApiError::Response(ref e) if e.code == 500));
}

#[tokio::test]
async fn test_product_update_by_sku_no_content_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = Product {
        sku: Some("SHIRT-9".to_string()),
        ..Default::default()
    };
    let error = tokio_test::assert_err!(Product::update_by_sku(&client, &update).await);

    assert_eq!(error.to_string(), "Product SHIRT-9 not found");
}

#[tokio::test]
async fn test_writes_without_identifiers_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let error = tokio_test::assert_err!(
        Product::update_by_sku(&client, &Product::default()).await
    );
    assert_eq!(error.to_string(), "Product without sku not found");

    let error = tokio_test::assert_err!(
        Product::update_inventory(
            &client,
            &ProductInventory {
                inventory_level: Some(3),
                ..Default::default()
            },
        )
        .await
    );
    assert_eq!(error.to_string(), "Product without id not found");

    let error = tokio_test::assert_err!(
        Variant::update_inventory(
            &client,
            &VariantInventory {
                id: Some(17),
                product_id: None,
                inventory_level: 3,
                inventory_warning_level: None,
            },
        )
        .await
    );
    assert_eq!(error.to_string(), "Variant without product_id not found");

    let error = tokio_test::assert_err!(
        GiftCertificate::update(&client, &GiftCertificate::default()).await
    );
    assert_eq!(error.to_string(), "GiftCertificate without id not found");
}

#[tokio::test]
async fn test_product_update_inventory() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/42"))
        .and(body_json(json!({"id": 42, "inventory_level": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 42, "inventory_level": 7}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let inventory = ProductInventory {
        id: Some(42),
        inventory_level: Some(7),
        ..Default::default()
    };
    let product = Product::update_inventory(&client, &inventory).await.unwrap();

    assert_eq!(product.inventory_level, Some(7));
}

#[tokio::test]
async fn test_product_metafields_keyed_by_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/products/42/metafields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "key": "fabric", "value": "cotton", "namespace": "details", "permission_set": "read"},
                {"id": 2, "key": "origin", "value": "PT", "namespace": "details", "permission_set": "read"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let fields = Product::metafields(&client, 42).await.unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields["fabric"].value, "cotton");
    assert_eq!(fields["origin"].id, Some(2));
}

#[tokio::test]
async fn test_product_channel_assignments() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/channel-assignments"))
        .and(body_json(json!([{"product_id": 42, "channel_id": 1}])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/stores/abc123/v3/catalog/products/channel-assignments"))
        .and(query_param("product_id:in", "42"))
        .and(query_param("channel_id:in", "1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/stores/abc123/v3/catalog/products/channel-assignments"))
        .and(query_param("channel_id:in", "2"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(Product::add_to_channel(&client, 42, 1).await.unwrap());
    assert!(Product::remove_from_channel(&client, 42, 1).await.unwrap());
    assert!(!Product::remove_from_channel(&client, 42, 2).await.unwrap());
}

// ============================================================================
// Variants
// ============================================================================

#[tokio::test]
async fn test_variant_update_by_sku_writes_under_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/catalog/variants"))
        .and(query_param("page", "1"))
        .and(query_param("sku", "SHIRT-1-RED"))
        .respond_with(single_page(json!([{"id": 17, "product_id": 5, "sku": "SHIRT-1-RED"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/5/variants/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 17, "product_id": 5, "sku": "SHIRT-1-RED", "price": 30.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let update = Variant {
        sku: Some("SHIRT-1-RED".to_string()),
        price: Some(30.5),
        ..Default::default()
    };
    let variant = Variant::update_by_sku(&client, &update).await.unwrap();

    assert_eq!(variant.price, Some(30.5));
}

#[tokio::test]
async fn test_variant_update_sale_price() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/5/variants/17"))
        .and(body_json(json!({"id": 17, "product_id": 5, "sale_price": 9.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 17, "product_id": 5, "sale_price": 9.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let price = VariantSalePrice {
        id: Some(17),
        product_id: Some(5),
        sale_price: 9.5,
    };
    let variant = Variant::update_sale_price(&client, &price).await.unwrap();

    assert_eq!(variant.sale_price, Some(9.5));
}

// ============================================================================
// Checkouts
// ============================================================================

#[tokio::test]
async fn test_checkout_find_and_discount() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/checkouts/cafe-01"))
        .and(query_param("include", "consignments.available_shipping_options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "cafe-01",
                "grand_total": 43.5,
                "consignments": [{"id": "c1", "available_shipping_options": [{"id": "s1"}]}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stores/abc123/v3/checkouts/cafe-01/discounts"))
        .and(body_json(json!({
            "carts": {"discounts": [{"discounted_amount": 5.5, "name": "Loyalty"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "cafe-01", "discount_amount": 5.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let checkout = Checkout::find(&client, "cafe-01").await.unwrap();
    assert_eq!(checkout.grand_total, Some(43.5));
    assert_eq!(checkout.consignments.unwrap().len(), 1);

    let cart = Checkout::add_discount(&client, "cafe-01", 5.5, "Loyalty")
        .await
        .unwrap();
    assert_eq!(cart.discount_amount, Some(5.5));
}

// ============================================================================
// Gift certificates
// ============================================================================

#[tokio::test]
async fn test_gift_certificate_find_by_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/gift_certificates"))
        .and(query_param("code", "GC-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5,
            "code": "GC-1",
            "balance": "12.5000",
            "purchase_date": "Tue, 04 Jun 2024 10:00:00 +0000",
            "expiry_date": ""
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/gift_certificates"))
        .and(query_param("code", "GC-2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/gift_certificates"))
        .and(query_param("code", "GC-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = GiftCertificate::find_by_code(&client, "GC-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.balance.as_deref(), Some("12.5000"));
    assert!(found.purchase_date.is_some());
    assert!(found.expiry_date.is_none());

    assert!(GiftCertificate::find_by_code(&client, "GC-2").await.unwrap().is_none());
    assert!(GiftCertificate::find_by_code(&client, "GC-3").await.unwrap().is_none());
}

#[tokio::test]
async fn test_gift_certificate_create_and_update_use_bare_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stores/abc123/v2/gift_certificates"))
        .and(body_json(json!({"amount": "50.00", "to_name": "Grace"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "amount": "50.0000", "to_name": "Grace", "status": "active"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v2/gift_certificates/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "status": "disabled"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = GiftCertificate::create(
        &client,
        &GiftCertificate {
            amount: Some("50.00".to_string()),
            to_name: Some("Grace".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(created.id, Some(9));

    let updated = GiftCertificate::update(
        &client,
        &GiftCertificate {
            id: Some(9),
            status: Some("disabled".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status.as_deref(), Some("disabled"));
}

// ============================================================================
// Tax
// ============================================================================

#[tokio::test]
async fn test_tax_zones_and_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/tax/zones"))
        .and(query_param("id:in", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Default", "enabled": true},
                {"id": 2, "name": "EU", "enabled": true, "shopper_target_settings": {
                    "locations": [{"country_code": "DE"}], "customer_groups": [0]
                }}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/tax/rates"))
        .and(query_param("tax_zone_id:in", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 4, "tax_zone_id": 2, "class_rates": [{"rate": 19.5, "tax_class_id": 0}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let zones = TaxZone::list(&client, &[1, 2]).await.unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[1].shopper_target_settings.locations[0].country_code, "DE");

    let rates = TaxClassRate::list(&client, &[2]).await.unwrap();
    assert_eq!(rates[0].class_rates[0].tax_class_id, 0);
}
