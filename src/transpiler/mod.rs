/*!
 * Bracks shorthand transpiler.
 *
 * The shorthand is rewritten by ordered regex tables:
 * - `rules`: the element vocabulary and the generated rule tables
 * - `engine`: the driver that applies the tables and the cleanup passes
 *
 * | Shorthand                 | Output                 |
 * |---------------------------|------------------------|
 * | `div[ ... ]div`           | `<div> ... </div>`     |
 * | `div(class="x")[ ... ]div`| `<div class="x"> ...`  |
 * | `[br]`                    | `<br>`                 |
 * | `img(src="a.png")/]`      | `<img src="a.png">`    |
 * | `c/[ note ]/c`            | `<!-- note -->`        |
 * | `[% code %]`              | `<% code %>` (EJS)     |
 */

pub mod engine;
pub mod rules;

pub use engine::{
    apply_rule_table, normalize_closing_brackets, strip_escapes, transpile, transpile_with,
    Dialect, TranspileOptions,
};
pub use rules::{RewriteRule, RuleTable};
