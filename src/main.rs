use leptos::prelude::*;
use radial_dish::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
