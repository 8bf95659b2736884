pub(crate) mod json_body;

pub(crate) use json_body::JsonBody;
