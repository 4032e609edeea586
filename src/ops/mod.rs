pub mod note_ops;
