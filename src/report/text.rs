//! Aligned text tables.
//!
//! ```text
//! Swansea / Abertawe (W06000011)
//! Population (pop)
//!          2000          2001       Average    Diff.  % Diff.
//! 223301.000000 223301.000000 223301.000000 0.000000 0.000000
//! ```
//!
//! Every column is right-aligned to the width of its value printed with six decimals.

use std::fmt;

use crate::types::{Area, Areas, Measure};

/// Width of `value` printed with six decimals: integer digits, the point, six decimals.
fn column_width(value: f64) -> usize {
    (value as i64).to_string().len() + 7
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label(), self.codename())?;
        if self.is_empty() {
            return writeln!(f, "<no data>");
        }

        let mut title = String::new();
        let mut values = String::new();
        for (year, value) in self.values() {
            let w = column_width(value);
            title.push_str(&format!("{year:>w$} "));
            values.push_str(&format!("{value:.6} "));
        }

        let (avg, diff, pct) = (
            self.average(),
            self.difference(),
            self.difference_percentage(),
        );
        title.push_str(&format!(
            "{:>w1$} {:>w2$} {:>w3$}",
            "Average",
            "Diff.",
            "% Diff.",
            w1 = column_width(avg),
            w2 = column_width(diff),
            w3 = column_width(pct),
        ));
        values.push_str(&format!("{avg:.6} {diff:.6} {pct:.6}"));

        writeln!(f, "{title}")?;
        writeln!(f, "{values}")
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name("eng").ok(), self.name("cym").ok()) {
            (Some(eng), Some(cym)) => write!(f, "{eng} / {cym}")?,
            (Some(name), None) | (None, Some(name)) => f.write_str(name)?,
            (None, None) => f.write_str("Unnamed")?,
        }
        writeln!(f, " ({})", self.code())?;

        if self.is_empty() {
            return writeln!(f, "<no measures>");
        }
        for measure in self.measures() {
            writeln!(f, "{measure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Areas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for area in self {
            writeln!(f, "{area}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Area, Areas, Measure};

    #[test]
    fn measure_table_is_aligned() {
        let mut m = Measure::new("pop", "Population");
        m.set_value(2000, 10.0);
        m.set_value(2001, 20.0);

        let expected = [
            "Population (pop)",
            "     2000      2001   Average     Diff.    % Diff.",
            "10.000000 20.000000 15.000000 10.000000 100.000000",
            "",
        ]
        .join("\n");
        assert_eq!(m.to_string(), expected);
    }

    #[test]
    fn empty_measure_has_no_table() {
        let m = Measure::new("pop", "Population");
        assert_eq!(m.to_string(), "Population (pop)\n<no data>\n");
    }

    #[test]
    fn area_header_uses_available_names() {
        let mut both = Area::new("W1");
        both.set_name("eng", "Test").unwrap();
        both.set_name("cym", "Prawf").unwrap();
        assert_eq!(both.to_string(), "Test / Prawf (W1)\n<no measures>\n");

        let mut cym = Area::new("W2");
        cym.set_name("cym", "Prawf").unwrap();
        assert!(cym.to_string().starts_with("Prawf (W2)\n"));

        assert!(Area::new("W3").to_string().starts_with("Unnamed (W3)\n"));
    }

    #[test]
    fn areas_print_in_code_order() {
        let mut areas = Areas::new();
        areas.set_area("W2", Area::new("W2"));
        areas.set_area("W1", Area::new("W1"));

        let out = areas.to_string();
        assert_eq!(
            out,
            "Unnamed (W1)\n<no measures>\n\nUnnamed (W2)\n<no measures>\n\n"
        );
    }
}
