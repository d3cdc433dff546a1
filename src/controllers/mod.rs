pub mod submission_controller;
