// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::dashboard::MAX_TREND_MONTHS;

pub const EXPORT_KINDS: [&str; 7] = [
    "income",
    "outgoings",
    "savings",
    "debt",
    "wishlist",
    "accounts",
    "spending",
];

fn json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn currency_arg() -> Arg {
    Arg::new("currency")
        .long("currency")
        .help("ISO currency code; falls back to your default currency")
}

fn amount_arg(name: &'static str, required: bool) -> Arg {
    let a = Arg::new(name).long(name).help("Amount; symbols and separators are ignored");
    if required { a.required(true) } else { a }
}

fn day_arg() -> Arg {
    Arg::new("day")
        .long("day")
        .value_parser(value_parser!(u32).range(1..=31))
        .help("Day of month it falls due (1-31)")
}

fn from_account_arg() -> Arg {
    Arg::new("from-account")
        .long("from-account")
        .value_parser(value_parser!(i64))
        .help("Debit this account id by the amount applied")
}

fn income_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("source").long("source").required(required))
        .arg(amount_arg("amount", required))
        .arg(Arg::new("category").long("category"))
        .arg(
            Arg::new("frequency")
                .long("frequency")
                .help("Monthly|Weekly|Bi-Weekly|Yearly|One-time"),
        )
        .arg(currency_arg())
        .arg(day_arg())
}

fn outgoing_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("description").long("description").required(required))
        .arg(amount_arg("amount", required))
        .arg(Arg::new("category").long("category"))
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD; one-off expenses default to today"),
        )
        .arg(
            Arg::new("frequency")
                .long("frequency")
                .help("Monthly|Weekly|Bi-Weekly|Yearly|One-time"),
        )
        .arg(currency_arg())
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .action(ArgAction::SetTrue)
                .help("Repeats every month on --day"),
        )
        .arg(
            Arg::new("one-off")
                .long("one-off")
                .action(ArgAction::SetTrue)
                .conflicts_with("recurring"),
        )
        .arg(day_arg())
}

fn savings_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("name").long("name").required(required))
        .arg(amount_arg("balance", false))
        .arg(amount_arg("target", false))
        .arg(Arg::new("category").long("category"))
        .arg(currency_arg())
}

fn debt_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("name").long("name").required(required))
        .arg(amount_arg("balance", required))
        .arg(amount_arg("apr", false))
        .arg(amount_arg("min-payment", false))
        .arg(Arg::new("priority").long("priority").help("Low|Medium|High"))
        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
        .arg(currency_arg())
}

fn wishlist_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("item").long("item").required(required))
        .arg(amount_arg("cost", required))
        .arg(amount_arg("saved", false))
        .arg(Arg::new("priority").long("priority").help("Low|Medium|High"))
        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
        .arg(currency_arg())
}

fn account_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("name").long("name").required(required))
        .arg(
            Arg::new("type")
                .long("type")
                .help("Checking|Savings|Credit Card|Investment|Cash|Other"),
        )
        .arg(amount_arg("balance", false))
        .arg(currency_arg())
}

pub fn build_cli() -> Command {
    Command::new("zenfin")
        .about("Zenfin: multi-currency budgeting, reminders and money coaching")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Acting user id (env ZENFIN_USER)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (env ZENFIN_DB)"),
        )
        .subcommand(Command::new("init").about("Initialize database"))
        .subcommand(
            Command::new("settings")
                .about("Per-user settings")
                .subcommand(
                    Command::new("currency")
                        .about("Set your default currency")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("income")
                .about("Income sources")
                .subcommand(income_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(income_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("outgoing")
                .about("Bills and expenses")
                .subcommand(outgoing_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(outgoing_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("savings")
                .about("Savings goals")
                .subcommand(savings_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(savings_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(amount_arg("amount", true))
                        .arg(from_account_arg()),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("debt")
                .about("Debts and minimum payments")
                .subcommand(debt_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(debt_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(
                    Command::new("pay")
                        .arg(id_arg())
                        .arg(amount_arg("amount", true))
                        .arg(from_account_arg()),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("wishlist")
                .about("Things you are saving up for")
                .subcommand(wishlist_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(wishlist_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(amount_arg("amount", true))
                        .arg(from_account_arg()),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("account")
                .about("Bank and cash accounts")
                .subcommand(account_fields(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(account_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(
                    Command::new("set-balance")
                        .arg(id_arg())
                        .arg(amount_arg("balance", true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("spend")
                .about("Day-to-day spending log")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(amount_arg("amount", true))
                        .arg(Arg::new("category").long("category"))
                        .arg(currency_arg())
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or RFC 3339; defaults to now"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")).arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            json_flags(Command::new("dashboard"))
                .about("Per-currency totals, categories, upcoming bills and trend")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(
                            RangedU64ValueParser::<usize>::new()
                                .range(1..=MAX_TREND_MONTHS as u64),
                        )
                        .help("Trend window in months (1-120)"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Max upcoming expenses"),
                ),
        )
        .subcommand(
            Command::new("notifications")
                .about("Bill reminders and savings milestones")
                .subcommand(json_flags(Command::new("list")).arg(
                    Arg::new("unread")
                        .long("unread")
                        .action(ArgAction::SetTrue),
                ))
                .subcommand(Command::new("read").arg(id_arg()))
                .subcommand(Command::new("read-all")),
        )
        .subcommand(
            Command::new("advise")
                .about("Ask the AI coach about your finances")
                .arg(Arg::new("question")
                        .long("question")
                        .required_unless_present("snapshot"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .action(ArgAction::SetTrue)
                        .help("Print the data that would be sent and exit"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export your records")
                .subcommands(EXPORT_KINDS.iter().map(|k| {
                    Command::new(*k)
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                })),
        )
        .subcommand(Command::new("doctor").about("Check data integrity"))
}
