use component_macros::Bean;
use infrastructure_common::{Bean as _, BeanFactory};
use std::collections::HashMap;
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Default, Bean)]
#[bean(order = 5, prototype, annotations("infra"), implements(dyn Clock + Send + Sync))]
pub struct FixedClock {
    #[value("clock.zone")]
    zone: String,
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.zone.len() as u64
    }
}

#[derive(Default, Bean)]
pub struct Scheduler {
    #[inject]
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    #[value(key = "scheduler.jobs")]
    jobs: Vec<String>,
    #[value("scheduler.labels")]
    labels: HashMap<String, String>,
    #[value("scheduler.threads")]
    threads: u8,
}

#[derive(Bean)]
#[bean(factory = "Manual::build")]
pub struct Manual {
    ready: bool,
}

impl Manual {
    fn build() -> Result<Self, infrastructure_common::DependencyError> {
        Ok(Self { ready: true })
    }
}

#[derive(Default, Bean)]
pub struct Marker;

fn main() {
    assert_eq!(FixedClock::order(), 5);
    assert!(!FixedClock::singleton());
    assert_eq!(FixedClock::annotations(), &["infra"]);
    assert_eq!(FixedClock::interfaces().len(), 1);
    assert!(Manual::create().map(|manual| manual.ready).unwrap_or(false));
    assert!(Marker::create().is_ok());

    let scheduler = Scheduler::create().unwrap();
    assert!(scheduler.clock.is_none());
    assert!(scheduler.jobs.is_empty() && scheduler.labels.is_empty());
    assert_eq!(scheduler.threads, 0);
}
