#[path = "property/momentum_monotonic.rs"]
mod momentum_monotonic;

#[path = "property/detection_filters.rs"]
mod detection_filters;

#[path = "property/pattern_analysis.rs"]
mod pattern_analysis;

#[path = "property/recommendation_order.rs"]
mod recommendation_order;
