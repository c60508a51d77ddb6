use std::{env, fs};

use anyhow::Context;
use libca::{BigUint, Rule};
use serde::Serialize;

/// The full lookup table of a rule, as written to the JSON dump.
#[derive(Debug, Serialize)]
struct RuleDump {
    #[serde(with = "libca::decimal")]
    number: BigUint,
    n: u32,
    mapping: Vec<RuleDumpEntry>,
}

#[derive(Debug, Serialize)]
struct RuleDumpEntry {
    pattern: String,
    output: u8,
}

impl From<&Rule> for RuleDump {
    fn from(rule: &Rule) -> Self {
        let mapping = rule
            .mapping()
            .map(|(pattern, output)| RuleDumpEntry {
                pattern: pattern.iter().map(|cell| cell.digit().to_string()).collect(),
                output: output.digit(),
            })
            .collect();

        Self {
            number: rule.number().clone(),
            n: rule.n(),
            mapping,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);

    let number = args
        .next()
        .context("Missing rule number")?
        .parse::<BigUint>()
        .context("Invalid rule number")?;

    let n = args
        .next()
        .map(|n| n.parse::<u32>())
        .transpose()
        .context("Invalid neighborhood size")?
        .unwrap_or(3);

    let rule = Rule::with_number(number, n)?;
    println!("{rule}");

    if let Some(dump_path) = args.next() {
        let serialized_rule =
            serde_json::to_string_pretty(&RuleDump::from(&rule)).context("Couldn't serialize rule")?;

        fs::write(&dump_path, serialized_rule)
            .with_context(|| format!("Couldn't write rule dump to {dump_path}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump() {
        let rule = Rule::new(60, 3).unwrap();
        let dump = serde_json::to_value(RuleDump::from(&rule)).unwrap();

        assert_eq!(dump["number"], "60");
        assert_eq!(dump["n"], 3);
        assert_eq!(dump["mapping"].as_array().unwrap().len(), 8);
        assert_eq!(dump["mapping"][6]["pattern"], "110");
        assert_eq!(dump["mapping"][6]["output"], 0);
        assert_eq!(dump["mapping"][3]["pattern"], "011");
        assert_eq!(dump["mapping"][3]["output"], 1);
    }

    #[test]
    fn test_dump_wide_rule() {
        let rule = Rule::new(u128::MAX, 7).unwrap();
        let dump = RuleDump::from(&rule);

        assert_eq!(dump.mapping.len(), 128);
        assert_eq!(dump.mapping[127].pattern, "1111111");
        assert!(dump.mapping.iter().all(|entry| entry.output == 1));

        let serialized = serde_json::to_string(&dump).unwrap();
        assert!(serialized.starts_with(&format!(r#"{{"number":"{}","n":7"#, u128::MAX)));
    }

    #[test]
    fn test_dump_nine_cells() {
        let rule = Rule::with_number(BigUint::from(1u32) << 511u32, 9).unwrap();
        let dump = RuleDump::from(&rule);

        assert_eq!(dump.mapping.len(), 512);
        assert_eq!(dump.mapping[0].pattern, "000000000");
        assert_eq!(dump.mapping[0].output, 1);
        assert_eq!(dump.mapping.iter().filter(|entry| entry.output == 1).count(), 1);
    }
}
