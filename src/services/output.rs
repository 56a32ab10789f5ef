//! Workflow-command and output-file formatting for the Actions runner.

/// Escapes a value for use as workflow-command data.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow-command property (e.g. `name=`).
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

pub fn command(name: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut out = format!("::{}", name);
    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(v)))
            .collect();
        out.push(' ');
        out.push_str(&props.join(","));
    }
    out.push_str("::");
    out.push_str(&escape_data(message));
    out
}

/// Formats one `GITHUB_OUTPUT` entry in the heredoc form.
pub fn file_entry(name: &str, value: &str, delimiter: &str) -> anyhow::Result<String> {
    if name.contains(delimiter) {
        anyhow::bail!("output name contains the delimiter {}", delimiter);
    }
    if value.contains(delimiter) {
        anyhow::bail!("output value contains the delimiter {}", delimiter);
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

pub fn new_delimiter() -> String {
    format!("ghadelimiter_{}", uuid::Uuid::new_v4())
}

/// Reads entries written by [`file_entry`] back into pairs.
#[cfg(test)]
pub fn parse_file(raw: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut lines = raw.lines();
    while let Some(header) = lines.next() {
        let Some((name, delim)) = header.split_once("<<") else {
            continue;
        };
        let mut value = Vec::new();
        for line in lines.by_ref() {
            if line == delim {
                break;
            }
            value.push(line);
        }
        out.push((name.to_string(), value.join("\n")));
    }
    out
}
