use crate::support::{fail, registry_or_exit};
use lineage_kernel::{NumberingStyle, ParameterDescriptor};
use serde_json::{Value, json};

pub fn run(styles: Option<String>, json_output: bool) {
    let mut registry = registry_or_exit(styles.as_deref(), json_output);
    let catalog = registry
        .list_styles()
        .unwrap_or_else(|e| fail(e, json_output));
    let source = registry.source().map(|path| path.display().to_string());

    if json_output {
        let entries: Vec<Value> = catalog.iter().map(|style| style_json(style.as_ref())).collect();
        let payload = json!({
            "source": source,
            "count": entries.len(),
            "styles": entries,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
        return;
    }

    println!("lineage styles");
    println!("  Source: {}", source.as_deref().unwrap_or("built-in"));
    println!("  Styles: {}", catalog.len());
    for style in &catalog {
        println!();
        println!("  {} ({})", style.id(), style.name());
        for descriptor in style.parameter_descriptors() {
            println!("    {}", describe(style.as_ref(), descriptor));
        }
    }
}

fn style_json(style: &dyn NumberingStyle) -> Value {
    let parameters: Vec<Value> = style
        .parameter_descriptors()
        .iter()
        .map(|descriptor| {
            let mut value = serde_json::to_value(descriptor).expect("json serialization");
            if let Some(object) = value.as_object_mut() {
                object.insert(
                    "value".to_string(),
                    serde_json::to_value(style.parameter(descriptor.key))
                        .expect("json serialization"),
                );
            }
            value
        })
        .collect();
    json!({
        "id": style.id(),
        "name": style.name(),
        "parameters": parameters,
    })
}

/// `key [kind: detail] = current  display name`
fn describe(style: &dyn NumberingStyle, descriptor: &ParameterDescriptor) -> String {
    let kind = descriptor.kind;
    let mut detail = kind.to_string();
    if kind.is_choice() {
        let values: Vec<&str> = descriptor.choices.iter().map(|choice| choice.value).collect();
        detail.push_str(&format!(": {}", values.join("|")));
    } else if kind.is_numeric() {
        let bound = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        if descriptor.min.is_some() || descriptor.max.is_some() {
            detail.push_str(&format!(
                ": {}..{}",
                bound(descriptor.min),
                bound(descriptor.max)
            ));
        }
    }
    let current = style
        .parameter(descriptor.key)
        .and_then(|value| serde_json::to_value(value).ok())
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} [{detail}] = {current}  {}",
        descriptor.key, descriptor.display_name
    )
}
