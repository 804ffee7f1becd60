use arcstr::ArcStr;
use kitepack_common::TransformRule;
use kitepack_error::{BuildError, BuildResult, RuleConflict, TransformError};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::{SharedTransform, TransformContext, TransformOutput};

#[derive(Debug)]
pub struct TransformStep {
  pub transform: SharedTransform,
  pub options: serde_json::Value,
}

/// The transforms of one rule, applied in declaration order.
#[derive(Debug)]
pub struct TransformChain {
  pub rule_name: ArcStr,
  pub steps: Vec<TransformStep>,
}

impl TransformChain {
  pub fn names(&self) -> Vec<ArcStr> {
    self.steps.iter().map(|step| ArcStr::from(step.transform.name().as_ref())).collect()
  }

  /// Each step receives the bytes of the previous one. Side artifacts and declared dependencies
  /// accumulate over the whole chain.
  pub fn apply(
    &self,
    ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> Result<TransformOutput, TransformError> {
    let mut output = TransformOutput::new(source);
    for step in &self.steps {
      let step_ctx = TransformContext { options: &step.options, ..*ctx };
      let code = std::mem::take(&mut output.code);
      let step_output = step.transform.transform(&step_ctx, code).map_err(|source| {
        TransformError {
          transform: step.transform.name().into_owned(),
          rule: self.rule_name.to_string(),
          source,
        }
      })?;
      output.code = step_output.code;
      output.side_artifacts.extend(step_output.side_artifacts);
      output.dependencies.extend(step_output.dependencies);
    }
    Ok(output)
  }
}

#[derive(Debug)]
struct CompiledRule {
  test_source: String,
  test: Regex,
  include: Vec<Regex>,
  exclude: Vec<Regex>,
  chain: TransformChain,
}

impl CompiledRule {
  fn is_gated(&self) -> bool {
    !self.include.is_empty() || !self.exclude.is_empty()
  }

  fn matches(&self, path: &str) -> bool {
    self.test.is_match(path)
      && (self.include.is_empty() || self.include.iter().any(|re| re.is_match(path)))
      && !self.exclude.iter().any(|re| re.is_match(path))
  }
}

/// Ordered rules mapping a module path to its transform chain. The first matching rule wins.
///
/// Rules carrying include/exclude conditions with an identical `test` form a dispatch group:
/// a path claimed by two members of one group is a [`RuleConflict`].
#[derive(Debug, Default)]
pub struct TransformRegistry {
  rules: Vec<CompiledRule>,
}

impl TransformRegistry {
  /// Fails on invalid regexes, empty chains and transform names missing from `transforms`.
  pub fn new(
    rules: &[TransformRule],
    transforms: &FxHashMap<String, SharedTransform>,
  ) -> BuildResult<Self> {
    let rules = rules
      .iter()
      .enumerate()
      .map(|(index, rule)| {
        let rule_name: ArcStr =
          rule.name.clone().unwrap_or_else(|| format!("rules[{index}]")).into();

        if rule.uses.is_empty() {
          return Err(BuildError::invalid_option(format!(
            "Rule \"{rule_name}\" has no transform"
          )));
        }

        let steps = rule
          .uses
          .iter()
          .map(|spec| {
            let transform = transforms.get(&spec.name).ok_or_else(|| {
              BuildError::invalid_option(format!(
                "Rule \"{rule_name}\" uses unknown transform \"{}\"",
                spec.name
              ))
            })?;
            Ok(TransformStep {
              transform: SharedTransform::clone(transform),
              options: spec.options.clone(),
            })
          })
          .collect::<BuildResult<Vec<_>>>()?;

        let compile = |pattern: &str| {
          Regex::new(pattern).map_err(|err| {
            BuildError::invalid_option(format!(
              "Rule \"{rule_name}\" has an invalid pattern \"{pattern}\": {err}"
            ))
          })
        };

        Ok(CompiledRule {
          test_source: rule.test.clone(),
          test: compile(&rule.test)?,
          include: rule.include.iter().map(|re| compile(re)).collect::<BuildResult<_>>()?,
          exclude: rule.exclude.iter().map(|re| compile(re)).collect::<BuildResult<_>>()?,
          chain: TransformChain { rule_name, steps },
        })
      })
      .collect::<BuildResult<Vec<_>>>()?;

    Ok(Self { rules })
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// `path` is the slash separated absolute module path. `None` means the module passes through
  /// unchanged.
  pub fn match_path(&self, path: &str) -> Result<Option<&TransformChain>, RuleConflict> {
    let Some((index, rule)) = self.rules.iter().enumerate().find(|(_, rule)| rule.matches(path))
    else {
      return Ok(None);
    };

    if rule.is_gated() {
      let conflicting = self.rules[index + 1..].iter().find(|other| {
        other.is_gated() && other.test_source == rule.test_source && other.matches(path)
      });
      if let Some(other) = conflicting {
        return Err(RuleConflict {
          path: path.to_string(),
          first: rule.chain.rule_name.to_string(),
          second: other.chain.rule_name.to_string(),
        });
      }
    }

    tracing::trace!(path, rule = %rule.chain.rule_name, "Transform rule matched");
    Ok(Some(&rule.chain))
  }
}
