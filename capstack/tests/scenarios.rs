use capstack::{
    Amount, BoxCapability, Capability, ChainBuilder, ChainConfig, Dispatcher, Payload,
    UnitConfig, UnitFactory, dispatch,
    sink::MemorySink,
    testing::{RecordingLegacyGateway, StubExecutor},
    units::{
        Channels, LegacyGatewayAdapter, Notifier, QueryUnit, SinkLegacyGateway,
        SinkTransactionService, TransactionServiceAdapter, notification_chain,
    },
};

mod common;
use common::message;

#[test]
fn email_then_sms_then_slack() {
    let sink = MemorySink::new();
    let chain = ChainBuilder::new()
        .base(Notifier::email(sink.shared()))
        .after_unit(Notifier::sms(sink.shared()))
        .after_unit(Notifier::slack(sink.shared()))
        .build()
        .unwrap();

    let outcome = dispatch(&chain, &message("New critical alert!"));

    assert!(outcome.is_success());
    assert_eq!(
        sink.lines(),
        vec![
            "Sending Email Notification: New critical alert!",
            "Sending SMS Notification: New critical alert!",
            "Sending Slack Notification: New critical alert!",
        ]
    );
}

#[test]
fn channel_flags_build_the_same_chain() {
    let sink = MemorySink::new();
    let chain =
        notification_chain(Channels::EMAIL | Channels::SMS | Channels::SLACK, sink.shared())
            .unwrap();

    dispatch(&chain, &message("Your package has shipped!"));

    assert_eq!(sink.lines().len(), 3);
    assert!(sink.lines()[0].starts_with("Sending Email"));
    assert!(sink.lines()[2].starts_with("Sending Slack"));
}

#[test]
fn legacy_gateway_receives_equivalent_float() {
    let gateway = RecordingLegacyGateway::new();
    let adapter = LegacyGatewayAdapter::new(gateway.clone());
    let amount: Amount = "100.50".parse().unwrap();

    let outcome = dispatch(&adapter, &Payload::new().with("amount", amount));

    assert!(outcome.is_success());
    assert_eq!(gateway.payments(), vec![100.50_f64]);
}

#[test]
fn processors_are_dispatched_generically() {
    let sink = MemorySink::new();
    let processors: Vec<BoxCapability> = vec![
        LegacyGatewayAdapter::new(SinkLegacyGateway::new(sink.shared())).boxed(),
        TransactionServiceAdapter::new(SinkTransactionService::new(sink.shared())).boxed(),
    ];

    let outcomes =
        Dispatcher::new().dispatch_all(&processors, &Payload::new().with("amount", "50.00"));

    assert!(outcomes.iter().all(|outcome| outcome.is_success()));
    assert_eq!(
        sink.lines(),
        vec![
            "[OldPaymentGateway] Processing payment of $50.00 using legacy system.",
            "[OldPaymentGateway] Transaction completed successfully via old system.",
            "[NewPaymentService] Executing transaction for 50.00 USD.",
            "[NewPaymentService] Transaction approved by new service.",
        ]
    );
}

#[test]
fn factory_config_drives_the_chain() {
    let sink = MemorySink::new();
    let factory = UnitFactory::with_defaults(sink.shared());
    let config = ChainConfig::new()
        .with_base(UnitConfig::new("payment-service").with_currency("EUR"))
        .after(UnitConfig::new("email").with_target("billing@example.com"));

    let outcome = Dispatcher::new().dispatch_built(
        factory.build_chain(&config),
        &Payload::new()
            .with("amount", "12.30")
            .with("message", "payment received"),
    );

    assert!(outcome.is_success());
    assert_eq!(
        sink.lines().last().map(String::as_str),
        Some("Sending Email Notification to billing@example.com: payment received")
    );
    assert!(sink.lines()[0].ends_with("12.30 EUR."));
}

#[test]
fn stored_procedure_script_with_notification() {
    let sink = MemorySink::new();
    let executor = StubExecutor::new();
    let script = QueryUnit::new("create-sp", executor.clone())
        .command("IF OBJECT_ID('sp_CountEmployeesInDepartment', 'P') IS NOT NULL DROP PROCEDURE sp_CountEmployeesInDepartment;")
        .command("")
        .command("CREATE PROCEDURE sp_CountEmployeesInDepartment @DepartmentID INT AS SELECT 1;");
    let chain = ChainBuilder::new()
        .base(script)
        .after_unit(Notifier::email(sink.shared()))
        .build()
        .unwrap();

    let outcome = dispatch(&chain, &message("procedure installed"));

    assert!(outcome.is_success());
    assert_eq!(executor.calls().len(), 2);
    assert_eq!(sink.lines(), vec!["Sending Email Notification: procedure installed"]);
}

#[test]
fn layered_processor_keeps_outcome() {
    use capstack::layers::{LayerExt, LogEffect};

    let gateway = RecordingLegacyGateway::new();
    let processor = LegacyGatewayAdapter::new(gateway.clone())
        .guarded()
        .traced("payments")
        .before(LogEffect);

    let outcome = dispatch(&processor, &Payload::new().with("amount", 12_i64));

    assert!(outcome.is_success());
    assert_eq!(outcome.origin(), "legacy-gateway");
    assert_eq!(gateway.payments(), vec![12.0]);
}
