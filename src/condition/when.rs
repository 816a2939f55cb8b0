use serde_json::{Map, Value};

use crate::channel::def::ChannelDef;
use crate::condition::predicate::Predicate;
use crate::condition::statement::{Outcome, Statement, shorthand_label};
use crate::expression::{Expr, datum};
use crate::foundation::error::{VlError, VlResult};

/// Arguments for [`when_with`] and [`Then::when_with`].
#[derive(Clone, Debug, Default)]
pub struct WhenArgs {
    predicates: Vec<Predicate>,
    constraints: Vec<(String, Expr)>,
    empty: Option<bool>,
}

impl WhenArgs {
    /// No predicates or constraints yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate.
    pub fn predicate(mut self, p: impl Into<Predicate>) -> Self {
        self.predicates.push(p.into());
        self
    }

    /// Require `datum[name] == value`.
    pub fn constraint(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.constraints.push((name.into(), value.into()));
        self
    }

    /// Override what an empty selection evaluates to.
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = Some(empty);
        self
    }
}

impl From<Predicate> for WhenArgs {
    fn from(p: Predicate) -> Self {
        WhenArgs::new().predicate(p)
    }
}

fn parse_when(args: WhenArgs) -> VlResult<Map<String, Value>> {
    let WhenArgs {
        mut predicates,
        constraints,
        empty,
    } = args;
    if predicates.is_empty() && constraints.is_empty() {
        return Err(VlError::argument(
            "At least one predicate or constraint must be provided",
        ));
    }
    if predicates.len() == 1
        && constraints.is_empty()
        && let Some(only) = predicates.pop()
    {
        return Ok(only.to_condition(empty));
    }

    if let Some(bad) = predicates.iter().find(|p| !p.is_composable()) {
        return Err(VlError::type_error(format!(
            "Predicate composition is not permitted for {}; \
             use an expression, a parameter, or a composition of those",
            bad.kind_name()
        )));
    }
    let mut all = predicates.into_iter().chain(
        constraints
            .into_iter()
            .map(|(name, v)| Predicate::Expr(datum(&name).equals(v))),
    );
    let first = all.next().ok_or_else(|| {
        VlError::argument("At least one predicate or constraint must be provided")
    })?;
    let composed = all.fold(first, |acc, p| acc.and(p));
    Ok(composed.to_condition(empty))
}

/// Start a condition chain from one predicate.
pub fn when(predicate: impl Into<Predicate>) -> When {
    When {
        condition: predicate.into().to_condition(None),
    }
}

/// Start a condition chain from several predicates and `field == value` constraints,
/// AND-combined.
pub fn when_with(args: WhenArgs) -> VlResult<When> {
    Ok(When {
        condition: parse_when(args)?,
    })
}

/// A predicate awaiting its outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct When {
    condition: Map<String, Value>,
}

impl When {
    /// Attach the outcome used when the predicate holds.
    pub fn then(&self, statement: impl Into<Statement>) -> Then {
        self.then_with(statement, Map::new())
    }

    /// [`When::then`] with extra properties merged into the outcome.
    pub fn then_with(&self, statement: impl Into<Statement>, extra: Map<String, Value>) -> Then {
        let Outcome {
            field_bearing,
            body,
        } = statement.into().classify();
        let mut cond = self.condition.clone();
        cond.extend(body);
        cond.extend(extra);
        let conditions = if field_bearing {
            Conditions::Single(cond)
        } else {
            Conditions::Chain(vec![cond])
        };
        Then { conditions }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Conditions {
    /// One field-bearing condition.
    Single(Map<String, Value>),
    /// Value conditions, evaluated in order.
    Chain(Vec<Map<String, Value>>),
}

/// One or more completed conditions, awaiting more branches or a fallback.
#[derive(Clone, Debug, PartialEq)]
pub struct Then {
    conditions: Conditions,
}

impl Then {
    /// Add another branch.
    pub fn when(&self, predicate: impl Into<Predicate>) -> VlResult<ChainedWhen> {
        self.when_with(WhenArgs::new().predicate(predicate))
    }

    /// Add another branch from several predicates and constraints.
    pub fn when_with(&self, args: WhenArgs) -> VlResult<ChainedWhen> {
        match &self.conditions {
            Conditions::Single(cond) => Err(VlError::composition(format!(
                "Chained conditions cannot be mixed with field conditions.\n\
                 Additional conditions would conflict with {}.\n\
                 Must finalize by calling `.otherwise()`.",
                shorthand_label(cond)
            ))),
            Conditions::Chain(chain) => Ok(ChainedWhen {
                chain: chain.clone(),
                condition: parse_when(args)?,
            }),
        }
    }

    /// Finish with the outcome used when no predicate holds.
    pub fn otherwise(&self, statement: impl Into<Statement>) -> VlResult<ChannelDef> {
        self.otherwise_with(statement, Map::new())
    }

    /// [`Then::otherwise`] with extra properties merged into the fallback.
    pub fn otherwise_with(
        &self,
        statement: impl Into<Statement>,
        extra: Map<String, Value>,
    ) -> VlResult<ChannelDef> {
        let fallback = statement.into().classify();
        let condition = match &self.conditions {
            Conditions::Single(cond) if fallback.field_bearing => {
                return Err(VlError::composition(format!(
                    "Only one field may be used within a condition.\n\
                     Shorthand {} would conflict with {}",
                    fallback.shorthand_label(),
                    shorthand_label(cond)
                )));
            }
            Conditions::Single(cond) => Value::Object(cond.clone()),
            Conditions::Chain(chain) if fallback.field_bearing => match chain.as_slice() {
                [only] => Value::Object(only.clone()),
                _ => {
                    return Err(VlError::composition(format!(
                        "Chained conditions cannot be mixed with field conditions.\n\
                         Shorthand {} would conflict with {} value conditions",
                        fallback.shorthand_label(),
                        chain.len()
                    )));
                }
            },
            Conditions::Chain(chain) => {
                Value::Array(chain.iter().cloned().map(Value::Object).collect())
            }
        };
        let mut body = fallback.body;
        body.extend(extra);
        body.insert("condition".into(), condition);
        Ok(ChannelDef::from_map(body))
    }

    /// Channel definition holding only the condition.
    pub fn to_channel_def(&self) -> ChannelDef {
        let condition = match &self.conditions {
            Conditions::Single(cond) => Value::Object(cond.clone()),
            Conditions::Chain(chain) => {
                Value::Array(chain.iter().cloned().map(Value::Object).collect())
            }
        };
        ChannelDef::new().with("condition", condition)
    }
}

impl From<Then> for ChannelDef {
    fn from(then: Then) -> Self {
        then.to_channel_def()
    }
}

impl From<Then> for Statement {
    fn from(then: Then) -> Self {
        Statement::Channel(then.to_channel_def())
    }
}

/// A further predicate on a value chain, awaiting its outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainedWhen {
    chain: Vec<Map<String, Value>>,
    condition: Map<String, Value>,
}

impl ChainedWhen {
    /// Attach a value outcome. Field outcomes cannot join a chain.
    pub fn then(&self, statement: impl Into<Statement>) -> VlResult<Then> {
        let outcome = statement.into().classify();
        if outcome.field_bearing {
            return Err(VlError::composition(format!(
                "Chained conditions cannot be mixed with field conditions.\n\
                 Shorthand {} would conflict with {} value conditions",
                outcome.shorthand_label(),
                self.chain.len()
            )));
        }
        let mut cond = self.condition.clone();
        cond.extend(outcome.body);
        let mut chain = self.chain.clone();
        chain.push(cond);
        Ok(Then {
            conditions: Conditions::Chain(chain),
        })
    }
}

/// Two-branch condition: `if_true` when `predicate` holds, `if_false` otherwise.
pub fn condition(
    predicate: impl Into<Predicate>,
    if_true: impl Into<Statement>,
    if_false: impl Into<Statement>,
) -> VlResult<ChannelDef> {
    condition_with(predicate, if_true, if_false, None, Map::new())
}

/// [`condition`] with an `empty` override and extra properties merged into the
/// `if_true` branch.
pub fn condition_with(
    predicate: impl Into<Predicate>,
    if_true: impl Into<Statement>,
    if_false: impl Into<Statement>,
    empty: Option<bool>,
    extra: Map<String, Value>,
) -> VlResult<ChannelDef> {
    let if_true = if_true.into().classify();
    let if_false = if_false.into().classify();
    if if_true.field_bearing && if_false.field_bearing {
        return Err(VlError::composition(format!(
            "A field cannot be used for both the `if_true` and `if_false` values of a \
             condition. One of them has to specify a `value` or `datum` definition.\n\
             Shorthand {} would conflict with {}",
            if_true.shorthand_label(),
            if_false.shorthand_label()
        )));
    }
    let mut cond = predicate.into().to_condition(empty);
    cond.extend(if_true.body);
    cond.extend(extra);
    let mut body = if_false.body;
    body.insert("condition".into(), Value::Object(cond));
    Ok(ChannelDef::from_map(body))
}

#[cfg(test)]
#[path = "../../tests/unit/condition/when.rs"]
mod tests;
