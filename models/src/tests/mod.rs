mod query_params;
