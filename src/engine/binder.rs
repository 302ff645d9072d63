use crate::tools::BoundArgs;

/// Split a raw argument string on commas and trim each piece.
pub fn split_args(args_csv: &str) -> Vec<&str> {
    args_csv.split(',').map(str::trim).collect()
}

/// Bind comma-separated values to a tool's declared parameter names by
/// position.
///
/// Missing values bind to the empty string; surplus values are dropped. Tools
/// validate their own arguments.
pub fn bind(schema: &[&str], args_csv: &str) -> BoundArgs {
    let mut values = split_args(args_csv).into_iter();
    schema
        .iter()
        .map(|name| ((*name).to_string(), values.next().unwrap_or_default().to_string()))
        .collect()
}
