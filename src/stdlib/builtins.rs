//! Built-in Commands Registry
//!
//! Defines every command that can be applied to a value, e.g. `hex(255)`.

use std::f64::consts::PI;

use crate::backend::OutputMode;

/// A built-in command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Terminate the process, optionally with an exit code
    Exit,
    /// Print usage, `help(1)` lists every command
    Help,
    /// Toggle or set the session debug flag
    Debug,
    /// Switch the output base for this line
    Mode(OutputMode),
    /// Length of a string
    Len,
    /// Code point to a one-character string
    Chr,
    /// Pure numeric transform
    Math(MathFn),
}

/// Numeric transforms. Trigonometry works in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    Sin,
    Cos,
    Tan,
    Atan,
    Deg,
    Rad,
    Fah,
    Cel,
    Round,
    Floor,
    Ceil,
    Abs,
}

/// Table entry used for help output and suggestions
#[derive(Debug, Clone, Copy)]
pub struct BuiltinInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

/// Every command name, aliases included
pub const BUILTINS: &[BuiltinInfo] = &[
    BuiltinInfo { name: "exit", usage: "exit [code]", summary: "quit, with exit code 0 unless one is given" },
    BuiltinInfo { name: "help", usage: "help [1]", summary: "show usage; help(1) lists every command" },
    BuiltinInfo { name: "debug", usage: "debug [0|1]", summary: "toggle, or set, tracing of each evaluation" },
    BuiltinInfo { name: "sin", usage: "sin x", summary: "sine of x degrees" },
    BuiltinInfo { name: "cos", usage: "cos x", summary: "cosine of x degrees" },
    BuiltinInfo { name: "tan", usage: "tan x", summary: "tangent of x degrees" },
    BuiltinInfo { name: "atan", usage: "atan x", summary: "arc tangent of x, in degrees" },
    BuiltinInfo { name: "deg", usage: "deg x", summary: "radians to degrees" },
    BuiltinInfo { name: "rad", usage: "rad x", summary: "degrees to radians" },
    BuiltinInfo { name: "fah", usage: "fah x", summary: "celsius to fahrenheit" },
    BuiltinInfo { name: "cel", usage: "cel x", summary: "fahrenheit to celsius" },
    BuiltinInfo { name: "hex", usage: "hex x", summary: "print the result in hexadecimal" },
    BuiltinInfo { name: "dec", usage: "dec x", summary: "print the result in decimal" },
    BuiltinInfo { name: "bin", usage: "bin x", summary: "print the result in binary" },
    BuiltinInfo { name: "round", usage: "round x", summary: "round half away from zero" },
    BuiltinInfo { name: "floor", usage: "floor x", summary: "round down" },
    BuiltinInfo { name: "ceil", usage: "ceil x", summary: "round up" },
    BuiltinInfo { name: "abs", usage: "abs x", summary: "absolute value" },
    BuiltinInfo { name: "len", usage: "len \"s\"", summary: "number of characters in a string" },
    BuiltinInfo { name: "chr", usage: "chr n", summary: "string holding the character with code n" },
    BuiltinInfo { name: "char", usage: "char n", summary: "same as chr" },
];

impl Builtin {
    /// Look up a command by name
    pub fn lookup(name: &str) -> Option<Builtin> {
        let builtin = match name {
            "exit" => Builtin::Exit,
            "help" => Builtin::Help,
            "debug" => Builtin::Debug,
            "sin" => Builtin::Math(MathFn::Sin),
            "cos" => Builtin::Math(MathFn::Cos),
            "tan" => Builtin::Math(MathFn::Tan),
            "atan" => Builtin::Math(MathFn::Atan),
            "deg" => Builtin::Math(MathFn::Deg),
            "rad" => Builtin::Math(MathFn::Rad),
            "fah" => Builtin::Math(MathFn::Fah),
            "cel" => Builtin::Math(MathFn::Cel),
            "hex" => Builtin::Mode(OutputMode::Hex),
            "dec" => Builtin::Mode(OutputMode::Decimal),
            "bin" => Builtin::Mode(OutputMode::Binary),
            "round" => Builtin::Math(MathFn::Round),
            "floor" => Builtin::Math(MathFn::Floor),
            "ceil" => Builtin::Math(MathFn::Ceil),
            "abs" => Builtin::Math(MathFn::Abs),
            "len" => Builtin::Len,
            "chr" | "char" => Builtin::Chr,
            _ => return None,
        };
        Some(builtin)
    }
}

impl MathFn {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            MathFn::Sin => deg_to_rad(x).sin(),
            MathFn::Cos => deg_to_rad(x).cos(),
            MathFn::Tan => deg_to_rad(x).tan(),
            MathFn::Atan => rad_to_deg(x.atan()),
            MathFn::Deg => rad_to_deg(x),
            MathFn::Rad => deg_to_rad(x),
            MathFn::Fah => cel_to_fah(x),
            MathFn::Cel => fah_to_cel(x),
            MathFn::Round => x.round(),
            MathFn::Floor => x.floor(),
            MathFn::Ceil => x.ceil(),
            MathFn::Abs => x.abs(),
        }
    }
}

pub fn deg_to_rad(x: f64) -> f64 {
    x * PI / 180.0
}

pub fn rad_to_deg(x: f64) -> f64 {
    x * 180.0 / PI
}

pub fn cel_to_fah(x: f64) -> f64 {
    x * 9.0 / 5.0 + 32.0
}

pub fn fah_to_cel(x: f64) -> f64 {
    (x - 32.0) * 5.0 / 9.0
}

/// Text printed by the `help` command
pub fn help_text(advanced: bool) -> String {
    let mut text = String::from("Arithmetic expression solver\n");
    if advanced {
        text.push_str("Commands take one argument, written after the name:\n");
        for info in BUILTINS {
            text.push_str(&format!("  {:<12} {}\n", info.usage, info.summary));
        }
        text.push_str("Operators: + - * / ^ % << >> | & # ~ ! =\n");
        text.push_str("Literals: 42, 1.5, 0xFF, 0b101, \"text\", 'text', true, false, pi\n");
    } else {
        text.push_str("(2+3)*3/3-3^2\n");
        text.push_str("There are also some basic functions available, e.g.\n");
        text.push_str("hex(2+3)\nbin(2*3)\ndec(0xFF)\n");
        text.push_str("help(1) lists every command\n");
        text.push_str("To exit press C-c or type exit\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for info in BUILTINS {
            assert!(Builtin::lookup(info.name).is_some(), "{} missing", info.name);
        }
        assert_eq!(Builtin::lookup("nope"), None);
        assert_eq!(Builtin::lookup("HEX"), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Builtin::lookup("chr"), Builtin::lookup("char"));
    }

    #[test]
    fn test_trig_in_degrees() {
        assert!(close(MathFn::Sin.apply(30.0), 0.5));
        assert!(close(MathFn::Cos.apply(60.0), 0.5));
        assert!(close(MathFn::Tan.apply(45.0), 1.0));
        assert!(close(MathFn::Atan.apply(1.0), 45.0));
    }

    #[test]
    fn test_conversions() {
        assert!(close(MathFn::Deg.apply(PI), 180.0));
        assert!(close(MathFn::Rad.apply(180.0), PI));
        assert!(close(MathFn::Fah.apply(100.0), 212.0));
        assert!(close(MathFn::Cel.apply(212.0), 100.0));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(MathFn::Round.apply(2.5), 3.0);
        assert_eq!(MathFn::Round.apply(-2.5), -3.0);
        assert_eq!(MathFn::Floor.apply(-1.5), -2.0);
        assert_eq!(MathFn::Ceil.apply(1.2), 2.0);
        assert_eq!(MathFn::Abs.apply(-4.0), 4.0);
    }

    #[test]
    fn test_advanced_help_lists_commands() {
        let text = help_text(true);
        for info in BUILTINS {
            assert!(text.contains(info.usage));
        }
        assert!(!help_text(false).contains("fahrenheit"));
    }
}
