#[path = "e2e/evolve_pipeline.rs"]
mod evolve_pipeline;

#[path = "e2e/diagnose_health.rs"]
mod diagnose_health;
