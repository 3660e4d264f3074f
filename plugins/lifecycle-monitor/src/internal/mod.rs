pub(crate) mod context;
pub(crate) mod invoke_context_from_message_loop;
pub(crate) mod message_loop;
