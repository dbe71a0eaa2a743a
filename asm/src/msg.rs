use color_print::cprintln;

#[derive(Debug)]
enum MsgKind {
    Error,
    Warn,
    Note,
}

/// Location a message points at: file, 1-based line number and raw line.
#[derive(Debug, Clone)]
pub struct Loc<'a> {
    pub file: &'a str,
    pub line: usize,
    pub raw: &'a str,
}

#[derive(Debug)]
pub struct Msg<'a> {
    kind: MsgKind,
    msg: String,
    loc: Option<Loc<'a>>,
}

impl<'a> Msg<'a> {
    pub fn error(msg: String) -> Self {
        Msg {
            kind: MsgKind::Error,
            msg,
            loc: None,
        }
    }
    pub fn warn(msg: String) -> Self {
        Msg {
            kind: MsgKind::Warn,
            msg,
            loc: None,
        }
    }
    pub fn note(msg: String) -> Self {
        Msg {
            kind: MsgKind::Note,
            msg,
            loc: None,
        }
    }

    pub fn at(mut self, loc: Loc<'a>) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, MsgKind::Error)
    }
}

impl Msg<'_> {
    pub fn print(&self) {
        match self.kind {
            MsgKind::Error => cprintln!("<red,bold>error</>: {}", self.msg),
            MsgKind::Warn => cprintln!("<yellow,bold>warn</>: {}", self.msg),
            MsgKind::Note => cprintln!("<green,bold>note</>: {}", self.msg),
        }
        if let Some(loc) = &self.loc {
            cprintln!("     <blue>--></> <underline>{}:{}</>", loc.file, loc.line);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", loc.line, loc.raw);
            cprintln!("      <blue>|</>");
        }
    }
}

pub fn dump(msgs: &[Msg]) {
    for msg in msgs {
        msg.print();
    }
}

pub fn has_error(msgs: &[Msg]) -> bool {
    msgs.iter().any(Msg::is_error)
}

/// Warns about include names listed more than once.
pub fn check_includes<S: AsRef<str>>(includes: &[S]) -> Vec<Msg<'static>> {
    let mut seen = indexmap::IndexSet::new();
    let mut msgs = vec![];
    for include in includes {
        let name = include.as_ref();
        if !seen.insert(name) {
            msgs.push(Msg::warn(format!("Duplicate include: `{}`", name)));
            msgs.push(Msg::note(format!(
                "The name is emitted twice. Remove one if this is not intentional."
            )));
        }
    }
    msgs
}
