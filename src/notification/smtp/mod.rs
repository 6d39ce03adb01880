pub mod smtp_email_sender;
