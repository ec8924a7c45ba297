//! End-to-end engine scenarios over mocked collaborators.

use std::collections::BTreeMap;

use hyperswitch_masking::Secret;
use mockall::Sequence;

use mpay24_gateway::client::{MockGatewayClient, PaymentResponse, StatusQuery};
use mpay24_gateway::interfaces::{
    MockDocumentFactory, MockPaymentLogger, MockSecretTokenProvider, MockTransactionStore,
};
use mpay24_gateway::mdxi::{MdxiOrder, PaymentOrder};
use mpay24_gateway::types::{
    MinorUnit, Mpay24Error, ResponseStatus, Transaction, TransactionField,
};
use mpay24_gateway::{
    CallbackConfig, ConfirmationOutcome, GatewaySystem, MerchantConfig, Mpay24,
};

type Engine = Mpay24<
    MockGatewayClient,
    MockTransactionStore,
    MockDocumentFactory,
    MockSecretTokenProvider,
    MockPaymentLogger,
>;

struct Collaborators {
    client: MockGatewayClient,
    store: MockTransactionStore,
    factory: MockDocumentFactory,
    secrets: MockSecretTokenProvider,
    logger: MockPaymentLogger,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            client: MockGatewayClient::new(),
            store: MockTransactionStore::new(),
            factory: MockDocumentFactory::new(),
            secrets: MockSecretTokenProvider::new(),
            logger: MockPaymentLogger::new(),
        }
    }
}

fn merchant_config(debug: bool) -> MerchantConfig {
    MerchantConfig {
        merchant_id: "91234".to_owned(),
        soap_password: Secret::new("soap-password".to_owned()),
        system: GatewaySystem::Test,
        proxy: None,
        debug,
    }
}

fn callbacks() -> CallbackConfig {
    CallbackConfig::new(
        "https://shop.example/ok",
        "https://shop.example/failed",
        "https://shop.example/confirm",
    )
    .expect("urls must parse")
}

fn engine(collaborators: Collaborators, debug: bool) -> Engine {
    Mpay24::new(
        merchant_config(debug),
        callbacks(),
        collaborators.client,
        collaborators.store,
        collaborators.factory,
        collaborators.secrets,
        collaborators.logger,
    )
    .expect("config must validate")
}

fn order_transaction() -> Transaction {
    let mut transaction = Transaction::new("ORDER-1");
    transaction.set(TransactionField::Price, "1000");
    transaction.set(TransactionField::Currency, "EUR");
    transaction
}

fn accepted_redirect() -> PaymentResponse {
    PaymentResponse {
        status: ResponseStatus::Ok,
        return_code: Some("REDIRECT".to_owned()),
        location: Some("https://test.mpay24.com/app/bin/checkout/91234".to_owned()),
        mpay_tid: None,
    }
}

#[tokio::test]
async fn pay_returns_the_redirect_target() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators
        .factory
        .expect_create_mdxi()
        .returning(|_| Ok(MdxiOrder::new("ORDER-1", MinorUnit::new(1000))));
    collaborators.client.expect_proxy_in_use().return_const(false);
    collaborators
        .client
        .expect_select_payment()
        .withf(|xml| xml.contains("<Tid>ORDER-1</Tid>") && xml.contains("<Price>1000</Price>"))
        .returning(|_| Ok(accepted_redirect()));

    let response = engine(collaborators, false)
        .pay()
        .await
        .expect("payment must be accepted");

    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(response.location.is_some(), "redirect target must be set");
}

#[tokio::test]
async fn pay_submits_default_callback_urls_unless_document_sets_them() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators
        .factory
        .expect_create_mdxi()
        .returning(|_| Ok(MdxiOrder::new("ORDER-1", MinorUnit::new(1000))));
    collaborators.client.expect_proxy_in_use().return_const(false);
    collaborators
        .client
        .expect_select_payment()
        .withf(|xml| {
            xml.contains("<Success>https://shop.example/ok</Success>")
                && xml.contains("<Confirmation>https://shop.example/confirm</Confirmation>")
        })
        .returning(|_| Ok(accepted_redirect()));

    engine(collaborators, false)
        .pay()
        .await
        .expect("payment must be accepted");
}

#[tokio::test]
async fn pay_rejects_structurally_invalid_documents_before_submission() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators.factory.expect_create_mdxi().returning(|_| {
        let mut document = MdxiOrder::new("ORDER-1", MinorUnit::new(1000));
        document.currency = Some("EURO".to_owned());
        Ok(document)
    });
    collaborators.client.expect_proxy_in_use().return_const(false);
    collaborators.client.expect_select_payment().times(0);

    let failure = engine(collaborators, false).pay().await.unwrap_err();
    match failure.current_context() {
        Mpay24Error::DocumentInvalid { errors, document } => {
            assert_eq!(errors.len(), 1);
            assert!(document.contains("<Currency>EURO</Currency>"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn pay_skips_validation_behind_an_intermediary_proxy() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators.factory.expect_create_mdxi().returning(|_| {
        // Structurally invalid; the proxy is trusted to validate instead.
        let mut document = MdxiOrder::new("ORDER-1", MinorUnit::new(1000));
        document.currency = Some("EURO".to_owned());
        Ok(document)
    });
    collaborators.client.expect_proxy_in_use().return_const(true);
    collaborators
        .client
        .expect_select_payment()
        .returning(|_| Ok(accepted_redirect()));

    assert!(engine(collaborators, false).pay().await.is_ok());
}

#[tokio::test]
async fn mandatory_transaction_data_is_checked_before_any_network_call() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_create_transaction().returning(|| {
        // PRICE missing.
        Ok(Transaction::new("ORDER-1"))
    });
    collaborators.factory.expect_create_mdxi().times(0);
    collaborators.client.expect_select_payment().times(0);

    let failure = engine(collaborators, false).pay().await.unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::MissingTransactionData { field: "PRICE" }
    ));
}

#[tokio::test]
async fn confirmation_with_wrong_token_never_updates_the_transaction() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators
        .client
        .expect_transaction_status()
        .returning(|_| {
            Ok(BTreeMap::from([
                ("STATUS".to_owned(), "RESERVED".to_owned()),
                ("PRICE".to_owned(), "1000".to_owned()),
            ]))
        });
    collaborators
        .secrets
        .expect_get_secret()
        .returning(|_| Ok(Some(Secret::new("xyz".to_owned()))));
    collaborators.store.expect_update_transaction().times(0);

    let engine = engine(collaborators, false);
    let args = BTreeMap::from([("token".to_owned(), "abc".to_owned())]);

    // Replaying the spoofed callback keeps dropping it silently.
    for _ in 0..3 {
        let outcome = engine
            .confirm("ORDER-1", &args)
            .await
            .expect("mismatch is not an error");
        assert_eq!(outcome, ConfirmationOutcome::Ignored);
    }
}

#[tokio::test]
async fn confirmation_without_token_is_dropped() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators
        .client
        .expect_transaction_status()
        .returning(|_| Ok(BTreeMap::from([("STATUS".to_owned(), "RESERVED".to_owned())])));
    collaborators
        .secrets
        .expect_get_secret()
        .returning(|_| Ok(Some(Secret::new("xyz".to_owned()))));
    collaborators.store.expect_update_transaction().times(0);

    let outcome = engine(collaborators, false)
        .confirm("ORDER-1", &BTreeMap::new())
        .await
        .expect("missing token is not an error");
    assert_eq!(outcome, ConfirmationOutcome::Ignored);
}

#[tokio::test]
async fn matched_confirmation_with_unconfirmed_shipping_decomposes_the_address() {
    let shipping_xml = concat!(
        r#"<Shipping confirmed="false"><Name>Jane Doe</Name>"#,
        "<Street>Main Street 1</Street><Zip>1010</Zip>",
        r#"<City>Vienna</City><Country code="AT"/></Shipping>"#,
    );

    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators
        .client
        .expect_transaction_status()
        .returning(move |_| {
            Ok(BTreeMap::from([
                ("STATUS".to_owned(), "RESERVED".to_owned()),
                ("SHIPPING_ADDR".to_owned(), shipping_xml.to_owned()),
            ]))
        });
    collaborators
        .secrets
        .expect_get_secret()
        .returning(|_| Ok(Some(Secret::new("xyz".to_owned()))));
    collaborators
        .store
        .expect_update_transaction()
        .withf(|tid, fields, shipping_confirmed| {
            tid == "ORDER-1"
                && !*shipping_confirmed
                && fields.get("SHIPP_NAME").map(String::as_str) == Some("Jane Doe")
                && fields.get("SHIPP_STREET").map(String::as_str) == Some("Main Street 1")
                && !fields.contains_key("SHIPP_STREET2")
                && fields.get("SHIPP_ZIP").map(String::as_str) == Some("1010")
                && fields.get("SHIPP_CITY").map(String::as_str) == Some("Vienna")
                && fields.get("SHIPP_COUNTRY").map(String::as_str) == Some("AT")
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let args = BTreeMap::from([("token".to_owned(), "xyz".to_owned())]);
    let outcome = engine(collaborators, false)
        .confirm("ORDER-1", &args)
        .await
        .expect("confirmation must succeed");
    assert_eq!(
        outcome,
        ConfirmationOutcome::Updated {
            shipping_confirmed: false
        }
    );
}

#[tokio::test]
async fn matched_confirmation_without_shipping_block_updates_as_confirmed() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators
        .client
        .expect_transaction_status()
        .returning(|_| {
            Ok(BTreeMap::from([
                ("STATUS".to_owned(), "BILLED".to_owned()),
                ("APPR_CODE".to_owned(), "123456".to_owned()),
            ]))
        });
    collaborators
        .secrets
        .expect_get_secret()
        .returning(|_| Ok(Some(Secret::new("xyz".to_owned()))));
    collaborators
        .store
        .expect_update_transaction()
        .withf(|_, fields, shipping_confirmed| {
            *shipping_confirmed
                && fields.get("APPR_CODE").map(String::as_str) == Some("123456")
                && !fields.keys().any(|key| key.starts_with("SHIPP_"))
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let args = BTreeMap::from([("token".to_owned(), "xyz".to_owned())]);
    let outcome = engine(collaborators, false)
        .confirm("ORDER-1", &args)
        .await
        .expect("confirmation must succeed");
    assert_eq!(
        outcome,
        ConfirmationOutcome::Updated {
            shipping_confirmed: true
        }
    );
}

#[tokio::test]
async fn status_query_falls_back_to_the_merchant_tid() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators
        .client
        .expect_transaction_status()
        .withf(|query| matches!(query, StatusQuery::ByMerchantTid(tid) if tid == "ORDER-1"))
        .times(1)
        .returning(|_| Ok(BTreeMap::from([("STATUS".to_owned(), "RESERVED".to_owned())])));

    let status = engine(collaborators, false)
        .transaction_status("ORDER-1")
        .await
        .expect("status must normalize");
    assert!(status.shipping_confirmed);
}

#[tokio::test]
async fn status_query_prefers_a_numeric_gateway_id() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "12345678901");
        Ok(transaction)
    });
    collaborators
        .client
        .expect_transaction_status()
        .withf(|query| matches!(query, StatusQuery::ByGatewayId(id) if id == "12345678901"))
        .times(1)
        .returning(|_| Ok(BTreeMap::from([("STATUS".to_owned(), "BILLED".to_owned())])));

    engine(collaborators, false)
        .transaction_status("ORDER-1")
        .await
        .expect("status must normalize");
}

#[tokio::test]
async fn both_query_paths_produce_the_same_normalized_shape() {
    let gateway_state = || {
        Ok(BTreeMap::from([
            ("STATUS".to_owned(), "RESERVED".to_owned()),
            ("PRICE".to_owned(), "1000".to_owned()),
            ("CURRENCY".to_owned(), "EUR".to_owned()),
        ]))
    };

    let mut by_tid = Collaborators::default();
    by_tid
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    by_tid
        .client
        .expect_transaction_status()
        .returning(move |_| gateway_state());

    let mut by_gateway_id = Collaborators::default();
    by_gateway_id.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "12345678901");
        Ok(transaction)
    });
    by_gateway_id
        .client
        .expect_transaction_status()
        .returning(move |_| gateway_state());

    let merchant_path = engine(by_tid, false)
        .transaction_status("ORDER-1")
        .await
        .expect("status must normalize");
    let gateway_path = engine(by_gateway_id, false)
        .transaction_status("ORDER-1")
        .await
        .expect("status must normalize");

    assert_eq!(merchant_path, gateway_path);
}

#[tokio::test]
async fn non_numeric_gateway_id_degrades_to_the_merchant_tid() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "pending");
        Ok(transaction)
    });
    collaborators
        .client
        .expect_transaction_status()
        .withf(|query| matches!(query, StatusQuery::ByMerchantTid(tid) if tid == "ORDER-1"))
        .times(1)
        .returning(|_| Ok(BTreeMap::from([("STATUS".to_owned(), "RESERVED".to_owned())])));

    engine(collaborators, false)
        .transaction_status("ORDER-1")
        .await
        .expect("status must normalize");
}

#[tokio::test]
async fn finish_express_checkout_rejects_a_malformed_cancel_token() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().times(0);
    collaborators.factory.expect_create_finish_express_checkout_order().times(0);
    collaborators.client.expect_callback_paypal().times(0);

    let failure = engine(collaborators, false)
        .finish_express_checkout_payment("ORDER-1", MinorUnit::new(200), MinorUnit::new(1200), "maybe")
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::InvalidArgument { name: "cancel", .. }
    ));
}

#[tokio::test]
async fn finish_express_checkout_submits_the_renegotiated_amounts() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "12345678901");
        Ok(transaction)
    });
    collaborators
        .factory
        .expect_create_finish_express_checkout_order()
        .withf(|tid, shipping_costs, amount, cancel| {
            tid == "ORDER-1"
                && *shipping_costs == MinorUnit::new(200)
                && *amount == MinorUnit::new(1200)
                && !cancel.is_cancel()
        })
        .returning(|tid, shipping_costs, amount, cancel| {
            let mut order = PaymentOrder::new(tid, amount);
            order.shipping_costs = Some(shipping_costs);
            order.cancel = Some(cancel);
            Ok(order)
        });
    collaborators
        .client
        .expect_callback_paypal()
        .withf(|xml| {
            xml.contains("<ShippingCosts>200</ShippingCosts>")
                && xml.contains("<Price>1200</Price>")
                && xml.contains("<Cancel>false</Cancel>")
                && xml.contains("<MpayTid>12345678901</MpayTid>")
        })
        .returning(|_| {
            Ok(PaymentResponse {
                status: ResponseStatus::Ok,
                return_code: Some("OK".to_owned()),
                location: None,
                mpay_tid: Some("12345678901".to_owned()),
            })
        });

    engine(collaborators, false)
        .finish_express_checkout_payment("ORDER-1", MinorUnit::new(200), MinorUnit::new(1200), "false")
        .await
        .expect("finish must be accepted");
}

#[tokio::test]
async fn finish_express_checkout_requires_a_known_gateway_id() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators.client.expect_callback_paypal().times(0);

    let failure = engine(collaborators, false)
        .finish_express_checkout_payment("ORDER-1", MinorUnit::new(200), MinorUnit::new(1200), "false")
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::TransactionNotFound { tid } if tid == "ORDER-1"
    ));
}

#[tokio::test]
async fn clear_amount_validates_amount_and_currency_before_the_gateway_id() {
    // Zero amount.
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators.client.expect_manual_clear().times(0);
    let failure = engine(collaborators, false)
        .clear_amount("ORDER-1", MinorUnit::new(0))
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::InvalidArgument { name: "amount", .. }
    ));

    // Malformed stored currency.
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Currency, "EURO");
        Ok(transaction)
    });
    collaborators.client.expect_manual_clear().times(0);
    let failure = engine(collaborators, false)
        .clear_amount("ORDER-1", MinorUnit::new(500))
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::InvalidArgument { name: "currency", .. }
    ));

    // No gateway id on record.
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators.client.expect_manual_clear().times(0);
    let failure = engine(collaborators, false)
        .clear_amount("ORDER-1", MinorUnit::new(500))
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::TransactionNotFound { .. }
    ));
}

#[tokio::test]
async fn clear_amount_delegates_to_the_facade() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "12345678901");
        Ok(transaction)
    });
    collaborators
        .client
        .expect_manual_clear()
        .withf(|mpay_tid, amount, currency| {
            mpay_tid == "12345678901" && *amount == MinorUnit::new(500) && currency == "EUR"
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(PaymentResponse {
                status: ResponseStatus::Ok,
                return_code: Some("OK".to_owned()),
                location: None,
                mpay_tid: Some("12345678901".to_owned()),
            })
        });

    engine(collaborators, false)
        .clear_amount("ORDER-1", MinorUnit::new(500))
        .await
        .expect("clear must be accepted");
}

#[tokio::test]
async fn credit_amount_forwards_the_customer_reference() {
    let mut collaborators = Collaborators::default();
    collaborators.store.expect_get_transaction().returning(|_| {
        let mut transaction = order_transaction();
        transaction.set(TransactionField::Mpaytid, "12345678901");
        transaction.set(TransactionField::Customer, "Jane Doe");
        Ok(transaction)
    });
    collaborators
        .client
        .expect_manual_credit()
        .withf(|_, _, _, customer| customer.as_deref() == Some("Jane Doe"))
        .times(1)
        .returning(|_, _, _, _| {
            Ok(PaymentResponse {
                status: ResponseStatus::Ok,
                return_code: Some("OK".to_owned()),
                location: None,
                mpay_tid: Some("12345678901".to_owned()),
            })
        });

    engine(collaborators, false)
        .credit_amount("ORDER-1", MinorUnit::new(500))
        .await
        .expect("credit must be accepted");
}

#[tokio::test]
async fn cancel_transaction_requires_a_known_gateway_id() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_get_transaction()
        .returning(|_| Ok(order_transaction()));
    collaborators.client.expect_manual_reverse().times(0);

    let failure = engine(collaborators, false)
        .cancel_transaction("ORDER-1")
        .await
        .unwrap_err();
    assert!(matches!(
        failure.current_context(),
        Mpay24Error::TransactionNotFound { .. }
    ));
}

#[tokio::test]
async fn debug_mode_logs_request_then_response() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators
        .factory
        .expect_create_mdxi()
        .returning(|_| Ok(MdxiOrder::new("ORDER-1", MinorUnit::new(1000))));
    collaborators.client.expect_proxy_in_use().return_const(false);
    collaborators
        .client
        .expect_select_payment()
        .returning(|_| Ok(accepted_redirect()));
    collaborators
        .client
        .expect_etp_url()
        .return_const("https://test.mpay24.com/app/bin/etpproxy_v15".to_owned());
    collaborators
        .client
        .expect_last_request()
        .return_const(Some("<Order><Tid>ORDER-1</Tid></Order>".to_owned()));
    collaborators
        .client
        .expect_last_response()
        .return_const(Some("<Result><Status>OK</Status></Result>".to_owned()));

    let mut sequence = Sequence::new();
    collaborators
        .logger
        .expect_write_log()
        .withf(|operation, info| {
            operation == "Pay"
                && info.starts_with("REQUEST to https://test.mpay24.com")
                && info.contains("<Order>\n<Tid>ORDER-1</Tid>\n</Order>")
        })
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    collaborators
        .logger
        .expect_write_log()
        .withf(|operation, info| operation == "Pay" && info.starts_with("RESPONSE - "))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));

    engine(collaborators, true)
        .pay()
        .await
        .expect("payment must be accepted");
}

#[tokio::test]
async fn log_failures_never_mask_the_payment_result() {
    let mut collaborators = Collaborators::default();
    collaborators
        .store
        .expect_create_transaction()
        .returning(|| Ok(order_transaction()));
    collaborators
        .factory
        .expect_create_mdxi()
        .returning(|_| Ok(MdxiOrder::new("ORDER-1", MinorUnit::new(1000))));
    collaborators.client.expect_proxy_in_use().return_const(false);
    collaborators
        .client
        .expect_select_payment()
        .returning(|_| Ok(accepted_redirect()));
    collaborators
        .client
        .expect_etp_url()
        .return_const("https://test.mpay24.com/app/bin/etpproxy_v15".to_owned());
    collaborators
        .client
        .expect_last_request()
        .return_const(Some("<Order/>".to_owned()));
    collaborators
        .client
        .expect_last_response()
        .return_const(Some("<Result/>".to_owned()));
    collaborators
        .logger
        .expect_write_log()
        .returning(|_, _| Err(Mpay24Error::CollaboratorError.into()));

    let response = engine(collaborators, true)
        .pay()
        .await
        .expect("log failures are best-effort");
    assert_eq!(response.status, ResponseStatus::Ok);
}

#[test]
fn engine_construction_rejects_malformed_credentials() {
    let mut config = merchant_config(false);
    config.merchant_id = "12345".to_owned();
    let result = Mpay24::new(
        config,
        callbacks(),
        MockGatewayClient::new(),
        MockTransactionStore::new(),
        MockDocumentFactory::new(),
        MockSecretTokenProvider::new(),
        MockPaymentLogger::new(),
    );
    assert!(result.is_err());
}
