use arch::symbol::is_symbol;

use crate::{
    codegen::CodeGen,
    error::{Error, Located},
    parser::Command,
};

/// A named VM source. The name is the `static` namespace of its commands.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub source: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Unit {
            name: name.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Emit the stack setup and `call Sys.init 0` ahead of every unit.
    pub bootstrap: bool,
    /// Precede each fragment with a `// <command>` line.
    pub comments: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            bootstrap: false,
            comments: true,
        }
    }
}

/// One combined output. Units are translated in the order they are given.
pub struct Session {
    codegen: CodeGen,
}

impl Session {
    pub fn new(options: &Options) -> Self {
        let mut codegen = CodeGen::new(options.comments);
        if options.bootstrap {
            codegen.write_init();
        }
        Session { codegen }
    }

    /// The unit name prefixes its `static` symbols, so it must be a valid symbol itself.
    pub fn translate_unit(&mut self, unit: &Unit) -> Result<(), Located> {
        if !is_symbol(&unit.name) {
            let err = Error::InvalidName(unit.name.clone());
            return Err(Located::new(&unit.name, 0, err));
        }
        self.codegen.set_unit(&unit.name);
        for (idx, line) in unit.source.lines().enumerate() {
            let cmd = Command::parse(line).map_err(|err| Located::new(&unit.name, idx, err))?;
            if let Some(cmd) = cmd {
                self.codegen.write(&cmd);
            }
        }
        Ok(())
    }

    pub fn finish(self) -> String {
        self.codegen.finish()
    }
}

/// Translates `units` into one assembly text. The first error aborts the whole session.
pub fn translate(units: &[Unit], options: &Options) -> Result<String, Located> {
    let mut session = Session::new(options);
    for unit in units {
        session.translate_unit(unit)?;
    }
    Ok(session.finish())
}
