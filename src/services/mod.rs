pub mod metric_query;
