//! Browser entry point on wasm32, command line tool everywhere else.

#[cfg(target_arch = "wasm32")]
fn main() {
	community_matrix::init_logging();
	leptos::mount::mount_to_body(community_matrix::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
	community_matrix::cli::main()
}
