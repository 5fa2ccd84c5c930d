pub(crate) mod result_table;
