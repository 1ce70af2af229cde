//! InstanceBuilder behavior: wiring order, object-likeness, malformed entries

mod common;

use common::{fixture_registry, Logger, Mailer, Widget};
use wirebox::{
    ArgumentSpec, Container, Error, InstanceBuilder, MethodCall, PropertyAssignment,
    StructuredDefinition, Value,
};

fn container() -> Container {
    Container::new(fixture_registry())
}

#[test]
fn test_constructor_argument_resolves_a_service_reference() {
    let container = container();
    let transport = Value::instance(Logger::default());
    container.set_shared("transport", wirebox::ServiceDefinition::literal(transport.clone()));

    let definition =
        StructuredDefinition::new("Mailer").with_argument(ArgumentSpec::service("transport"));
    let built = InstanceBuilder::new(Some(&container))
        .build(&definition, None)
        .unwrap();

    let mailer = built.downcast::<Mailer>().unwrap();
    assert!(mailer.transport.ptr_eq(&transport));
}

#[test]
fn test_setter_call_injects_the_resolved_logger() {
    let container = container();
    container.set_shared("logger", wirebox::ServiceDefinition::class_name("Logger"));

    let definition = StructuredDefinition::new("Mailer")
        .with_argument(ArgumentSpec::parameter("smtp"))
        .with_call(MethodCall::new(
            "set_logger",
            vec![ArgumentSpec::service("logger")],
        ));
    let built = InstanceBuilder::new(Some(&container))
        .build(&definition, None)
        .unwrap();

    let mailer = built.downcast::<Mailer>().unwrap();
    let logger = mailer.logger.lock().unwrap().clone().expect("logger was not injected");
    let shared = container.get("logger").unwrap();
    assert!(shared.ptr_eq(&Value::from_instance(logger)));
}

#[test]
fn test_calls_run_in_order_before_properties() {
    let container = container();
    let definition = StructuredDefinition::new("Widget")
        .with_call(MethodCall::new("first", vec![]))
        .with_call(MethodCall::new("second", vec![]))
        .with_property(PropertyAssignment::new(
            "third",
            ArgumentSpec::parameter(true),
        ));

    let built = InstanceBuilder::new(Some(&container))
        .build(&definition, None)
        .unwrap();

    let widget = built.downcast::<Widget>().unwrap();
    let events = widget.events.lock().unwrap().clone();
    assert_eq!(events, vec!["first", "second", "third"]);
}

#[test]
fn test_property_receives_a_falsy_literal() {
    let container = container();
    let definition = StructuredDefinition::new("Mailer")
        .with_argument(ArgumentSpec::parameter("smtp"))
        .with_property(PropertyAssignment::new(
            "prefix",
            ArgumentSpec::parameter(""),
        ));

    let built = InstanceBuilder::new(Some(&container))
        .build(&definition, None)
        .unwrap();

    let mailer = built.downcast::<Mailer>().unwrap();
    assert_eq!(*mailer.prefix.lock().unwrap(), "");
}

#[test]
fn test_setter_injection_on_a_literal_result_fails() {
    let container = container();
    let definition =
        StructuredDefinition::new("Scalar").with_call(MethodCall::new("anything", vec![]));

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::Configuration { message }) => {
            assert!(message.contains("did not produce an object"), "got: {message}");
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_property_injection_on_a_literal_result_fails() {
    let container = container();
    let definition = StructuredDefinition::new("Scalar").with_property(PropertyAssignment::new(
        "anything",
        ArgumentSpec::parameter(1),
    ));

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_empty_method_name_names_its_position() {
    let container = container();
    let definition = StructuredDefinition::new("Widget")
        .with_call(MethodCall::new("first", vec![]))
        .with_call(MethodCall::new("", vec![]));

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::Configuration { message }) => {
            assert!(message.contains("position 1"), "got: {message}");
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_empty_property_name_names_its_position() {
    let container = container();
    let definition = StructuredDefinition::new("Widget").with_property(PropertyAssignment::new(
        "",
        ArgumentSpec::parameter(1),
    ));

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::Configuration { message }) => {
            assert!(message.contains("position 0"), "got: {message}");
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_unknown_method_is_a_configuration_error() {
    let container = container();
    let definition =
        StructuredDefinition::new("Widget").with_call(MethodCall::new("missing", vec![]));

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::Configuration { message }) => assert!(message.contains("missing")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_unknown_class_is_a_resolution_error() {
    let container = container();
    let definition = StructuredDefinition::new("Ghost");

    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::ServiceResolution { service, .. }) => assert_eq!(service, "Ghost"),
        other => panic!("Expected ServiceResolution error, got {other:?}"),
    }
}

#[test]
fn test_building_without_a_container_fails() {
    let definition = StructuredDefinition::new("Widget");
    let result = InstanceBuilder::new(None).build(&definition, None);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_missing_class_name_fails() {
    let container = container();
    let definition = StructuredDefinition::new("");
    let result = InstanceBuilder::new(Some(&container)).build(&definition, None);
    match result {
        Err(Error::Configuration { message }) => assert!(message.contains("class_name")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}
