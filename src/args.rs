use clap::{Arg, Command};

pub fn parse_args() -> clap::ArgMatches {
    Command::new("par2check")
        .version("0.1.0")
        .about("Verifies files against a PAR2 recovery stream")
        .arg(
            Arg::new("input")
                .help("PAR2 file describing the recovery set")
                .required(true),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .help("Number of verification workers (0 = all cores)")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .get_matches()
}
