use std::path::PathBuf;

use anyhow::anyhow;
use log::debug;
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::{commands::*, AppResult, Expression};

#[derive(Parser)]
#[grammar = "../rules.pest"]
struct PestParser;

pub struct CliCommandParser;

impl CliCommandParser {
    /// An empty line means `again`.
    pub fn from(line: &str) -> AppResult<CliCommand> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(CliCommand::Again);
        }

        let sentence = PestParser::parse(Rule::sentence, line)
            .map_err(|e| {
                debug!("parse error: {}", e);
                anyhow!("Unknown command: {}", line)
            })?
            .next()
            .ok_or_else(|| anyhow!("Unknown command: {}", line))?;
        let pair = sentence
            .into_inner()
            .next()
            .ok_or_else(|| anyhow!("Unknown command: {}", line))?;

        let command = match pair.as_rule() {
            Rule::again_instruction => CliCommand::Again,
            Rule::restart_instruction => CliCommand::Restart,
            Rule::continue_instruction => CliCommand::Continue,
            Rule::help_instruction => CliCommand::Help,
            Rule::step_instruction => {
                CliCommand::Step(pair.into_inner().next().map(|p| Expression::new(p.as_str())))
            }
            Rule::break_instruction => CliCommand::Break(parse_expression(pair)?),
            Rule::watch_instruction => CliCommand::Watch(parse_expression(pair)?),
            Rule::delete_instruction => {
                let id = first_inner(pair)?.as_str().parse::<usize>()?;
                CliCommand::Delete(id)
            }
            Rule::print_instruction => parse_print(pair)?,
            Rule::load_labels_instruction => {
                CliCommand::LoadLabels(PathBuf::from(first_inner(pair)?.as_str().trim()))
            }
            rule => return Err(anyhow!("unexpected rule {:?}. Is the Pest grammar up to date?", rule)),
        };

        Ok(command)
    }
}

fn first_inner(pair: Pair<'_, Rule>) -> AppResult<Pair<'_, Rule>> {
    let rule = pair.as_rule();

    pair.into_inner()
        .next()
        .ok_or_else(|| anyhow!("{:?} requires an argument", rule))
}

fn parse_expression(pair: Pair<'_, Rule>) -> AppResult<Expression> {
    Ok(Expression::new(first_inner(pair)?.as_str()))
}

fn parse_print(pair: Pair<'_, Rule>) -> AppResult<CliCommand> {
    let mut count = 1;
    let mut format = PrintFormat::Word;
    let mut location = None;

    for node in pair.into_inner() {
        match node.as_rule() {
            Rule::print_spec => {
                for spec in node.into_inner() {
                    match spec.as_rule() {
                        Rule::print_count => count = spec.as_str().parse::<usize>()?,
                        Rule::print_format => format = PrintFormat::from_specifier(spec.as_str())?,
                        v => return Err(anyhow!("unexpected node '{:?}' here.", v)),
                    }
                }
            }
            Rule::expression => location = Some(Expression::new(node.as_str())),
            v => return Err(anyhow!("unexpected node '{:?}' here.", v)),
        }
    }
    let location = location.ok_or_else(|| anyhow!("print requires an expression"))?;

    Ok(CliCommand::Print {
        count,
        format,
        location,
    })
}
