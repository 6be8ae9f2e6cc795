//! Interactive parameter entry. Each answer is checked as soon as it's
//! entered, and the question is asked again until the answer is valid.

use anyhow::{anyhow, bail, Context};
use std::{
    io::{BufRead, Write},
    str::FromStr,
};
use vasarely::{
    Color3, PaletteColor, Point2, Point3, Region, Sphere, TilingConfig,
};

/// Asks questions on one stream, reads answers from another
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a question until the answer passes validation, and return the
    /// validated value. Fails only if the input ends or can't be read.
    pub fn ask<T>(
        &mut self,
        question: &str,
        validate: impl Fn(&str) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        loop {
            write!(self.output, "{}: ", question)?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                bail!("input ended before {:?} was answered", question);
            }
            match validate(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "  {:#}", err)?,
            }
        }
    }

    /// Ask for every parameter of a tiling
    pub fn tiling_config(&mut self) -> anyhow::Result<TilingConfig> {
        let region = loop {
            let lower_left = self.ask(
                "Lower left corner of the tiling (x, y)",
                parse_corner,
            )?;
            let upper_right = self.ask(
                "Upper right corner of the tiling (x, y)",
                parse_corner,
            )?;
            let region = Region::new(lower_left, upper_right);
            if region.is_empty() {
                writeln!(
                    self.output,
                    "  the upper right corner must be above and to the right \
                    of the lower left corner"
                )?;
            } else {
                break region;
            }
        };

        let palette = PaletteColor::names().collect::<Vec<_>>().join(", ");
        let mut colors = [Color3::new_int(0, 0, 0); 3];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = self.ask(
                &format!("Color {} ({}, or #rrggbb)", i + 1, palette),
                |answer| answer.parse(),
            )?;
        }

        let edge_length =
            self.ask("Edge length of a hexagon", parse_edge_length)?;

        let center = Point3::new(
            self.ask("Sphere center x", parse_integer)?,
            self.ask("Sphere center y", parse_integer)?,
            self.ask("Sphere center z (height)", parse_integer)?,
        );
        let radius = self.ask("Sphere radius", parse_positive)?;

        Ok(TilingConfig {
            region,
            edge_length,
            colors,
            sphere: Sphere::new(center, radius),
        })
    }
}

/// Parse a whole number, positive or negative
fn parse_integer(answer: &str) -> anyhow::Result<f64> {
    let value = i32::from_str(answer)
        .with_context(|| format!("{:?} is not a whole number", answer))?;
    Ok(value.into())
}

/// Parse a whole number greater than zero
fn parse_positive(answer: &str) -> anyhow::Result<f64> {
    let value = u32::from_str(answer)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| anyhow!("{:?} is not a positive whole number", answer))?;
    Ok(value.into())
}

/// Parse an edge length, which also has to be one that a [TilingConfig]
/// accepts
fn parse_edge_length(answer: &str) -> anyhow::Result<f64> {
    let value = parse_positive(answer)?;
    TilingConfig::EDGE_LENGTH_RANGE
        .ensure_contains(value)
        .context("invalid edge length")?;
    Ok(value)
}

/// Parse a corner as `x, y`. A single number is used for both x and y.
fn parse_corner(answer: &str) -> anyhow::Result<Point2> {
    let components = answer
        .split(',')
        .map(|component| parse_integer(component.trim()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    match components.as_slice() {
        [value] => Ok(Point2::new(*value, *value)),
        [x, y] => Ok(Point2::new(*x, *y)),
        _ => bail!("expected a corner of the form x, y but got {:?}", answer),
    }
}
