use helpdesk::application::CallCenter;
use helpdesk::config::Config;
use helpdesk::domain::shared::events::DomainEvent;
use helpdesk::{CallId, EmployeeId, Person};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Optional config file path as the only argument
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Helpdesk");
    info!("Configuration loaded: {:?}", config);

    let mut center = CallCenter::from_config(&config)?;
    demo_shift(&mut center)?;

    Ok(())
}

/// Walk one staff member through a workday with a single call
fn demo_shift(center: &mut CallCenter) -> anyhow::Result<()> {
    info!("=== Shift Demo ===");

    let manager_id = EmployeeId::new(3);
    let staff_id = EmployeeId::new(4);
    let call_id = CallId::new(2);

    center.hire_manager(manager_id, "Grace", "Hopper")?;
    center.hire_staff(staff_id, "Ada", "Lovelace", manager_id)?;
    center.open_call(call_id)?;

    center.start_workday(staff_id)?;
    info!("Free staff: {:?}", center.free_staff());

    if let Some(candidate) = center.free_staff().first().copied() {
        center.accept_call(candidate, call_id)?;
        info!("Call {} taken by staff {}", call_id, candidate);
    }

    center.end_call(staff_id, call_id, 0.9)?;
    center.end_workday(staff_id)?;

    if let Some(staff) = center.staff(staff_id) {
        info!(
            "{} is {}, worked {:?}, average rating {:?}",
            staff.full_name(),
            staff.status(),
            staff.working_time_elapsed(),
            staff.average_rating()
        );
    }

    let events = center.take_events();
    info!("Generated {} domain events", events.len());
    for event in &events {
        info!("  {}", event.event_type());
    }

    info!("=== Shift Demo Complete ===");
    Ok(())
}
