pub(crate) mod scratch;
