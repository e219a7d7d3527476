/// Animation definitions and their validated form.
pub mod animation;
