/// TAP (Test Anything Protocol) v14 output.
/// Writes to stdout.
pub struct Tap {
    tests: Vec<TapTest>,
}

struct TapTest {
    ok: bool,
    desc: String,
    diagnostics: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Tap { tests: Vec::new() }
    }

    pub fn ok(&mut self, desc: impl Into<String>) {
        self.tests.push(TapTest {
            ok: true,
            desc: desc.into(),
            diagnostics: None,
        });
    }

    pub fn not_ok(&mut self, desc: impl Into<String>, diagnostics: impl Into<String>) {
        self.tests.push(TapTest {
            ok: false,
            desc: desc.into(),
            diagnostics: Some(diagnostics.into()),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.tests.iter().filter(|t| !t.ok).count()
    }

    /// Render the whole report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("TAP version 14\n");
        out.push_str(&format!("1..{}\n", self.tests.len()));
        for (i, t) in self.tests.iter().enumerate() {
            t.render_into(i + 1, &mut out);
        }
        let fail = self.failure_count();
        out.push_str(&format!("# tests {}\n", self.tests.len()));
        out.push_str(&format!("# pass  {}\n", self.tests.len() - fail));
        out.push_str(&format!("# fail  {}\n", fail));
        out
    }

    /// Only the failing points, numbered as in the full report.
    pub fn render_failures(&self) -> String {
        let mut out = String::new();
        for (i, t) in self.tests.iter().enumerate().filter(|(_, t)| !t.ok) {
            t.render_into(i + 1, &mut out);
        }
        out
    }

    /// Print the report. `quiet` keeps only the failures.
    pub fn finish(self, quiet: bool) {
        if quiet {
            print!("{}", self.render_failures());
        } else {
            print!("{}", self.render());
        }
    }
}

impl TapTest {
    fn render_into(&self, n: usize, out: &mut String) {
        if self.ok {
            out.push_str(&format!("ok {} - {}\n", n, self.desc));
            return;
        }
        out.push_str(&format!("not ok {} - {}\n", n, self.desc));
        if let Some(diag) = &self.diagnostics {
            for line in diag.lines() {
                out.push_str(&format!("  # {}\n", line));
            }
        }
    }
}
