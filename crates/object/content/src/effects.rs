//! `effect`, `param`, `dice` and `expr` directives.
//!
//! `effect` appends a node to the record's chain; the other three refine the
//! last node. Without an effect on the record they are accepted and do
//! nothing, and `expr` likewise does nothing when the last effect has no
//! dice.

use object_core::{
    Activation, Curse, Dice, Effect, EffectChain, EffectKind, EgoItem, Expression, ObjectKind,
    ParamKind,
};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};

/// Records that own an effect chain.
pub trait HasEffects {
    fn effects_mut(&mut self) -> &mut EffectChain;
}

impl HasEffects for Curse {
    fn effects_mut(&mut self) -> &mut EffectChain {
        &mut self.obj.effects
    }
}

impl HasEffects for Activation {
    fn effects_mut(&mut self) -> &mut EffectChain {
        &mut self.effects
    }
}

impl HasEffects for ObjectKind {
    fn effects_mut(&mut self) -> &mut EffectChain {
        &mut self.effects
    }
}

impl HasEffects for EgoItem {
    fn effects_mut(&mut self) -> &mut EffectChain {
        &mut self.effects
    }
}

/// Appends a new effect named `name`.
///
/// `subtype` is resolved against the effect's parameter vocabulary into
/// `params[0]`; `xtra` goes to `params[1]`.
pub fn add_effect(
    chain: &mut EffectChain,
    name: &str,
    subtype: Option<&str>,
    xtra: Option<i32>,
) -> ParseResult<()> {
    let kind = EffectKind::find(name).ok_or_else(|| ParseError::InvalidEffect(name.to_owned()))?;
    let mut effect = Effect::new(kind);

    if let Some(subtype) = subtype {
        if kind.param_kind() == ParamKind::None {
            return Err(ParseError::InvalidParam(subtype.to_owned()));
        }
        effect.params[0] = kind
            .resolve_param(subtype)
            .ok_or_else(|| ParseError::InvalidParam(subtype.to_owned()))?;
    }
    if let Some(xtra) = xtra {
        effect.params[1] = xtra;
    }

    chain.push(effect);
    Ok(())
}

/// Sets `params[1]` (and `params[2]`) of the last effect.
pub fn set_params(chain: &mut EffectChain, p2: i32, p3: Option<i32>) {
    let Some(effect) = chain.last_mut() else {
        return;
    };
    effect.params[1] = p2;
    if let Some(p3) = p3 {
        effect.params[2] = p3;
    }
}

/// Parses `text` and attaches the dice to the last effect.
pub fn attach_dice(chain: &mut EffectChain, text: &str) -> ParseResult<()> {
    let Some(effect) = chain.last_mut() else {
        return Ok(());
    };
    effect.dice = Some(Dice::parse(text).map_err(ParseError::InvalidDice)?);
    Ok(())
}

/// Binds an expression to variable `name` of the last effect's dice.
pub fn bind_expression(
    chain: &mut EffectChain,
    name: &str,
    base: &str,
    operations: &str,
) -> ParseResult<()> {
    let Some(dice) = chain.last_mut().and_then(|effect| effect.dice.as_mut()) else {
        return Ok(());
    };

    let mut expression = Expression::with_base_name(base)
        .map_err(|_| ParseError::InvalidExpression(base.to_owned()))?;
    expression
        .add_operations(operations)
        .map_err(ParseError::BadExpressionString)?;
    dice.bind(name, &expression)
        .map_err(ParseError::UnboundExpression)
}

fn parse_effect<R: HasEffects, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let record = session.record_mut()?;
    add_effect(
        record.effects_mut(),
        fields.sym("eff")?,
        fields.opt_sym("type")?,
        fields.opt_int("xtra")?,
    )
}

fn parse_param<R: HasEffects, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let record = session.record_mut()?;
    set_params(record.effects_mut(), fields.int("p2")?, fields.opt_int("p3")?);
    Ok(())
}

fn parse_dice<R: HasEffects, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let record = session.record_mut()?;
    attach_dice(record.effects_mut(), fields.str("dice")?)
}

fn parse_expr<R: HasEffects, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let record = session.record_mut()?;
    bind_expression(
        record.effects_mut(),
        fields.sym("name")?,
        fields.sym("base")?,
        fields.str("expr")?,
    )
}

/// Registers `effect`, `param`, `dice` and `expr`.
pub fn register_effects<'a, R: HasEffects, X>(
    parser: &mut DirectiveParser<TableSession<'a, R, X>>,
) -> ParseResult<()> {
    parser.register("effect sym eff ?sym type ?int xtra", parse_effect::<R, X>)?;
    parser.register("param int p2 ?int p3", parse_param::<R, X>)?;
    parser.register("dice str dice", parse_dice::<R, X>)?;
    parser.register("expr sym name sym base str expr", parse_expr::<R, X>)?;
    Ok(())
}
