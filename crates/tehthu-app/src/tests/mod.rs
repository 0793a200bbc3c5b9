mod event_flow_tests;
mod log_pump_tests;
