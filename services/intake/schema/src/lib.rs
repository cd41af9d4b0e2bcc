//! sea-orm entities for the intake service: the user directory and the
//! application store (applications plus their attachment rows).

pub mod application_attachments;
pub mod applications;
pub mod users;
