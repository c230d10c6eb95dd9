use component_macros::Bean;
use di_abstractions::IocExt;
use di_impl::{load_bean, SimpleIoc};
use std::collections::HashMap;

#[derive(Default, Bean)]
pub struct Listener {
    #[value("listener.ports")]
    ports: Vec<u16>,
    #[value("listener.limits")]
    limits: HashMap<String, u32>,
    #[value("listener.hosts")]
    hosts: Vec<String>,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Default, Bean)]
pub struct HTTPClient;

#[derive(Default, Bean)]
pub struct HttpClient;

fn main() {
    let ioc = SimpleIoc::new();
    let mut environment = HashMap::new();
    environment.insert("listener.ports".to_string(), "80,443".to_string());
    environment.insert("listener.limits".to_string(), "a:1".to_string());
    environment.insert("listener.hosts".to_string(), "a,b".to_string());

    let listener = load_bean::<Listener>(&ioc, &environment).unwrap();
    assert!(listener.ports.is_empty());
    assert!(listener.limits.is_empty());
    assert_eq!(listener.hosts, vec!["a", "b"]);

    load_bean::<HTTPClient>(&ioc, &environment).unwrap();
    load_bean::<HttpClient>(&ioc, &environment).unwrap();
    assert!(ioc.get_bean::<HTTPClient>().is_some());
    assert!(ioc.get_bean::<HttpClient>().is_some());
}
