use clap::Parser;

/// Collects the weekly availability of a group and ranks the candidate slots.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the group: slots, participants, organizer
    /// and data file. If not provided, the built-in group is used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The CSV file holding the availability table. Setting this option
    /// overrides the `dataFile` entry of the configuration.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (name) The participant whose availability is being recorded. Requires --weights.
    #[clap(long, value_parser)]
    pub participant: Option<String>,

    /// (list of comma-separated values) One answer per slot, in slot order. Each answer is
    /// 0, 0.5, 1 or equivalently no, maybe, yes.
    #[clap(long, value_parser)]
    pub weights: Option<String>,

    /// (file path or 'stdout') If specified, the summary is written in JSON format to the given
    /// location. Setting this option overrides the `outputFile` entry of the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, the program checks that the
    /// computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
