mod common;
mod post_trip;
