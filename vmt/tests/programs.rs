use arch::symbol::Predef::*;
use hemu::State;
use hvmt::{translate, Options, Unit};

const TMAX: u64 = 1_000_000;

/// Translates, assembles and runs `units`. `setup` initializes RAM before the first step.
fn run(units: &[Unit], bootstrap: bool, setup: impl FnOnce(&mut State)) -> State {
    let options = Options {
        bootstrap,
        ..Options::default()
    };
    let asm = translate(units, &options).unwrap();
    let words = hasm::assemble(&asm).unwrap();

    let mut state = State::new();
    state.load(&words).unwrap();
    setup(&mut state);
    let steps = state.run(TMAX).unwrap();
    assert!(state.is_terminated(), "no halt after {} steps", steps);
    state
}

fn frame(state: &mut State) {
    state.set(SP, 256);
    state.set(LCL, 300);
    state.set(ARG, 400);
    state.set(THIS, 3000);
    state.set(THAT, 3010);
}

#[test]
fn simple_add() {
    let state = run(
        &[Unit::new("Main", "push constant 7\npush constant 8\nadd\n")],
        false,
        frame,
    );
    assert_eq!(state.get(SP), 257);
    assert_eq!(state.get(256u16), 15);
}

#[test]
fn arithmetic() {
    let state = run(
        &[Unit::new(
            "Main",
            "\
push constant 10
push constant 3
sub
neg
push constant 12
push constant 10
and
push constant 5
not
",
        )],
        false,
        frame,
    );
    assert_eq!(state.get(SP), 259);
    assert_eq!(state.get(256u16), (-7i16) as u16);
    assert_eq!(state.get(257u16), 8);
    assert_eq!(state.get(258u16), !5u16);
}

#[test]
fn relational() {
    let state = run(
        &[Unit::new(
            "Main",
            "\
push constant 5
push constant 5
eq
push constant 5
push constant 3
gt
push constant 5
push constant 3
lt
push constant 3
push constant 5
eq
",
        )],
        false,
        frame,
    );
    assert_eq!(state.get(SP), 260);
    assert_eq!(state.get(256u16), 0xFFFF);
    assert_eq!(state.get(257u16), 0xFFFF);
    assert_eq!(state.get(258u16), 0);
    assert_eq!(state.get(259u16), 0);
}

#[test]
fn segments() {
    let state = run(
        &[Unit::new(
            "Main",
            "\
push constant 11
pop local 2
push constant 22
pop argument 1
push constant 3030
pop pointer 0
push constant 33
pop this 4
push constant 44
pop temp 6
push local 2
push temp 6
add
pop constant 9
",
        )],
        false,
        frame,
    );
    assert_eq!(state.get(302u16), 11);
    assert_eq!(state.get(401u16), 22);
    assert_eq!(state.get(THIS), 3030);
    assert_eq!(state.get(3034u16), 33);
    assert_eq!(state.get(11u16), 44);
    assert_eq!(state.get(SP), 257);
    assert_eq!(state.get(256u16), 55);
}

#[test]
fn static_isolation() {
    let state = run(
        &[
            Unit::new("Foo", "push constant 1\npop static 0\n"),
            Unit::new("Bar", "push constant 2\npop static 0\n"),
            Unit::new("Main", "push static 0\n"),
        ],
        false,
        frame,
    );
    assert_eq!(state.get(16u16), 1);
    assert_eq!(state.get(17u16), 2);
    assert_eq!(state.get(SP), 257);
    assert_eq!(state.get(256u16), 0);
}

#[test]
fn branching() {
    // sum of 1..=5 into static 0
    let state = run(
        &[Unit::new(
            "Main",
            "\
push constant 5
pop temp 0
label LOOP
push temp 0
push static 0
add
pop static 0
push temp 0
push constant 1
sub
pop temp 0
push temp 0
if-goto LOOP
",
        )],
        false,
        frame,
    );
    assert_eq!(state.get(16u16), 15);
    assert_eq!(state.get(SP), 256);
}

#[test]
fn call_and_return() {
    let state = run(
        &[Unit::new(
            "Main",
            "\
push constant 100
push constant 3
push constant 4
call Main.add 2
label HALT
goto HALT
function Main.add 1
push argument 0
push argument 1
add
pop local 0
push constant 999
push local 0
return
",
        )],
        false,
        frame,
    );
    // SP before the call was 259
    assert_eq!(state.get(SP), 259 - 2 + 1);
    assert_eq!(state.get(256u16), 100);
    assert_eq!(state.get(257u16), 7);
    assert_eq!(state.get(LCL), 300);
    assert_eq!(state.get(ARG), 400);
    assert_eq!(state.get(THIS), 3000);
    assert_eq!(state.get(THAT), 3010);
}

#[test]
fn recursion() {
    let state = run(
        &[
            Unit::new(
                "Main",
                "\
function Main.fib 0
push argument 0
push constant 2
lt
if-goto BASE
push argument 0
push constant 1
sub
call Main.fib 1
push argument 0
push constant 2
sub
call Main.fib 1
add
return
label BASE
push argument 0
return
",
            ),
            Unit::new(
                "Sys",
                "\
function Sys.init 0
push constant 10
call Main.fib 1
pop static 0
label END
goto END
",
            ),
        ],
        true,
        |_| {},
    );
    assert_eq!(state.get(16u16), 55);
    // Sys.init frame stays on the stack
    assert_eq!(state.get(SP), 261);
    assert_eq!(state.get(ARG), 256);
    assert_eq!(state.get(LCL), 261);
}

#[test]
fn unknown_command() {
    let err = translate(
        &[Unit::new("Main", "push constant 1\nmod\n")],
        &Options::default(),
    )
    .unwrap_err();
    assert_eq!(err.unit, "Main");
    assert_eq!(err.line_idx, 1);
}
