//! Shared fixtures: a small class catalog exercised across the test suite
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use wirebox::{ClassEntry, ClassRegistry, Error, Value};

/// Collects log lines; the classic shared service
#[derive(Default)]
pub struct Logger {
    pub messages: Mutex<Vec<String>>,
}

impl Logger {
    pub fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Plain value object constructed from positional arguments
pub struct Transport {
    pub host: String,
    pub port: i64,
}

/// Constructor-injected transport, setter-injected logger, property prefix
pub struct Mailer {
    pub transport: Value,
    pub logger: Mutex<Option<Arc<Logger>>>,
    pub prefix: Mutex<String>,
}

/// Records every setter call and property assignment, in order
#[derive(Default)]
pub struct Widget {
    pub events: Mutex<Vec<String>>,
}

impl Widget {
    pub fn record(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }
}

/// Class registry covering every fixture type
pub fn fixture_registry() -> ClassRegistry {
    let registry = ClassRegistry::new();

    registry.register(
        ClassEntry::builder("Logger")
            .constructor(|_| Ok(Value::instance(Logger::default())))
            .build()
            .unwrap(),
    );

    registry.register(
        ClassEntry::builder("Transport")
            .constructor(|args| {
                let host = args
                    .first()
                    .and_then(Value::as_str)
                    .unwrap_or("localhost")
                    .to_string();
                let port = args.get(1).and_then(Value::as_i64).unwrap_or(25);
                Ok(Value::instance(Transport { host, port }))
            })
            .build()
            .unwrap(),
    );

    registry.register(
        ClassEntry::builder("Mailer")
            .constructor(|args| {
                let transport = args
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::configuration("Mailer requires a transport"))?;
                Ok(Value::instance(Mailer {
                    transport,
                    logger: Mutex::new(None),
                    prefix: Mutex::new(String::new()),
                }))
            })
            .method::<Mailer, _>("set_logger", |mailer, args| {
                let logger = args
                    .first()
                    .and_then(|value| value.downcast::<Logger>())
                    .ok_or_else(|| Error::configuration("set_logger requires a Logger"))?;
                *mailer.logger.lock().unwrap() = Some(logger);
                Ok(())
            })
            .property::<Mailer, _>("prefix", |mailer, value| {
                *mailer.prefix.lock().unwrap() =
                    value.as_str().unwrap_or_default().to_string();
                Ok(())
            })
            .build()
            .unwrap(),
    );

    registry.register(
        ClassEntry::builder("Widget")
            .constructor(|_| Ok(Value::instance(Widget::default())))
            .method::<Widget, _>("first", |widget, _| {
                widget.record("first");
                Ok(())
            })
            .method::<Widget, _>("second", |widget, _| {
                widget.record("second");
                Ok(())
            })
            .property::<Widget, _>("third", |widget, _| {
                widget.record("third");
                Ok(())
            })
            .build()
            .unwrap(),
    );

    // Constructor that yields a bare literal, never an object
    registry.register(
        ClassEntry::builder("Scalar")
            .constructor(|_| Ok(Value::literal(42)))
            .build()
            .unwrap(),
    );

    registry
}
