pub(crate) mod auto;
