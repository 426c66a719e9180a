//! Observability setup for Lobby: structured logging via `tracing`, with an
//! optional OpenTelemetry bridge.

pub mod tracing_setup;
