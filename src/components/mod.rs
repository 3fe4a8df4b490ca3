pub mod matrix_view;
pub mod side_panel;
pub mod toolbar;
