//! 注册表与注入器的集中集成测试

use config_impl::{EnvironmentBuilder, PropertiesEnvironment};
use di_abstractions::{InjectionPoint, Injectable, Injector, InstanceField, Ioc, IocExt, ValueField};
use di_impl::{inject_fields, load_bean, FieldInjector, SimpleIoc, ValueInjector};
use infrastructure_common::{Bean, BeanFactory, DependencyError, Interface};
use std::collections::HashMap;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

trait MessageSource: Send + Sync {
    fn message(&self, code: &str) -> Option<String>;
}

#[derive(Debug, Default)]
struct StaticMessages {
    messages: HashMap<String, String>,
}

impl MessageSource for StaticMessages {
    fn message(&self, code: &str) -> Option<String> {
        self.messages.get(code).cloned()
    }
}

impl Bean for StaticMessages {
    fn interfaces() -> Vec<Interface> {
        vec![Interface::of::<Self, dyn MessageSource + Send + Sync>(
            |bean| -> Arc<dyn MessageSource + Send + Sync> { bean },
        )]
    }

    fn order() -> i32 {
        1
    }
}

impl BeanFactory for StaticMessages {
    fn create() -> Result<Self, DependencyError> {
        Ok(Self::default())
    }
}

impl Injectable for StaticMessages {
    fn injection_points() -> Vec<InjectionPoint<Self>> {
        vec![InjectionPoint::Value(ValueField::map(
            "messages",
            "messages",
            |bean: &mut Self, value| bean.messages = value,
        ))]
    }
}

#[derive(Default)]
struct Greeter {
    source: Option<Arc<dyn MessageSource + Send + Sync>>,
    greeting_code: String,
    locales: Vec<String>,
}

impl Bean for Greeter {}

impl BeanFactory for Greeter {
    fn create() -> Result<Self, DependencyError> {
        Ok(Self::default())
    }
}

impl Injectable for Greeter {
    fn injection_points() -> Vec<InjectionPoint<Self>> {
        vec![
            InjectionPoint::Instance(InstanceField::new(
                "source",
                |bean: &mut Self, source: Arc<dyn MessageSource + Send + Sync>| {
                    bean.source = Some(source);
                },
            )),
            InjectionPoint::Value(ValueField::text(
                "greeting_code",
                "greeter.code",
                |bean: &mut Self, value| bean.greeting_code = value,
            )),
            InjectionPoint::Value(ValueField::list(
                "locales",
                "greeter.locales",
                |bean: &mut Self, value| bean.locales = value,
            )),
        ]
    }
}

impl Greeter {
    fn greet(&self) -> Option<String> {
        self.source.as_ref()?.message(&self.greeting_code)
    }
}

fn environment() -> PropertiesEnvironment {
    PropertiesEnvironment::new()
        .with("messages", "hello:Hello,bye:Goodbye")
        .with("greeter.code", "hello")
        .with("greeter.locales", "en,fr,de")
}

#[test]
fn test_load_beans_in_order_and_inject() -> anyhow::Result<()> {
    init_tracing();
    let ioc = SimpleIoc::new();
    let environment = environment();

    load_bean::<StaticMessages>(&ioc, &environment)?;
    let greeter = load_bean::<Greeter>(&ioc, &environment)?;

    assert_eq!(greeter.greet().as_deref(), Some("Hello"));
    assert_eq!(greeter.locales, vec!["en", "fr", "de"]);
    assert!(ioc.get_bean::<dyn MessageSource + Send + Sync>().is_some());
    Ok(())
}

#[test]
fn test_missing_instance_dependency_is_fatal() {
    init_tracing();
    let ioc = SimpleIoc::new();

    let error = load_bean::<Greeter>(&ioc, &environment()).err().unwrap();

    assert!(error.to_string().contains("MessageSource"));
    assert!(ioc.is_empty());
}

#[test]
fn test_absent_configuration_keeps_defaults() -> anyhow::Result<()> {
    init_tracing();
    let ioc = SimpleIoc::new();
    ioc.add_bean(StaticMessages::default());
    let mut greeter = Greeter::default();

    inject_fields(&mut greeter, &ioc, &PropertiesEnvironment::new())?;

    assert!(greeter.source.is_some());
    assert!(greeter.greeting_code.is_empty());
    assert!(greeter.locales.is_empty());
    Ok(())
}

#[test]
fn test_single_injectors_against_built_environment() -> anyhow::Result<()> {
    init_tracing();
    let environment = EnvironmentBuilder::new()
        .set("greeter.locales", "en|fr")
        .set("value.split", "|")
        .build()?;
    let ioc = SimpleIoc::new();
    ioc.add_bean(StaticMessages::default());

    let points = Greeter::injection_points();
    let mut greeter = Greeter::default();
    for point in &points {
        match point {
            InjectionPoint::Instance(field) => FieldInjector::new(&ioc, field).injection(&mut greeter)?,
            InjectionPoint::Value(field) => {
                ValueInjector::new(&environment, field).injection(&mut greeter)?
            }
        }
    }

    assert_eq!(greeter.locales, vec!["en", "fr"]);
    assert!(greeter.source.is_some());
    Ok(())
}
