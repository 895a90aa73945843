//! Implements the `reef` command-line tool.

fn main() {
    reef_shell::entry::run();
}
