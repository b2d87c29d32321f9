use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use electmap::configuration::{read_config, Work};
use electmap::data::features;
use electmap::error::Result;
use electmap::presentation::DistrictViewModel;
use electmap::seats::SeatSummary;
use electmap::{check_features, engine, DistrictId, DistrictIndex, Selection, SelectionBridge, SelectionView};
use std::path::Path;
use std::process;

fn print_view(view: &DistrictViewModel) {
    println!("{} ({}) [{}]", view.name, view.party_code, view.badge.badge());
    println!("{}", view.district_label);
    if let Some(url) = &view.detail_url {
        println!("{}", url);
    }
    println!();
    println!("{}", view.narrative);
    println!();
    for share in view.shares.iter().filter(|s| s.visible) {
        println!("    {:<12} {:>6.2}%", share.bucket.to_string(), share.percentage);
    }
}

fn print_summary(work: &Work, index: &DistrictIndex) -> Result<()> {
    let summary = SeatSummary::build(index)?;
    println!("{}: {} seats", work.description, summary.seats.len());
    println!("    Democratic   {}", summary.democratic);
    println!("    Republican   {}", summary.republican);
    println!("    Other        {}", summary.other);
    let chart: String = summary
        .seats
        .iter()
        .map(|s| s.to_string().chars().next().unwrap_or('?'))
        .collect();
    println!("{}", chart);
    Ok(())
}

// finds the map feature for a district so its detail link is shown too
fn selection_for(work: &Work, district: DistrictId) -> Result<Selection> {
    if let Some(source) = &work.features {
        let features = features::load(&source.path, &source.fields)?;
        if let Some(feature) = features.iter().find(|f| f.district == district) {
            return Ok(Selection::from_feature(feature));
        }
    }
    Ok(Selection::new(district))
}

fn check(work: &Work, index: &DistrictIndex) -> Result<usize> {
    let mut problems = Vec::new();
    for (_, candidates) in index.iter() {
        if let Err(e) = engine::aggregate(candidates) {
            problems.push(e);
        }
    }
    if let Some(source) = &work.features {
        let features = features::load(&source.path, &source.fields)?;
        problems.extend(check_features(index, &features));
        let missing = index
            .districts()
            .filter(|d| !features.iter().any(|f| &f.district == *d))
            .count();
        if missing > 0 {
            log::warn!("{} districts have results but no map feature", missing);
        }
    }
    for problem in &problems {
        eprintln!("{}", problem);
    }
    Ok(problems.len())
}

fn run(matches: &ArgMatches) -> Result<i32> {
    let config = matches.value_of("config").unwrap_or("electmap.toml");
    let work = read_config(Path::new(config))?;
    let index = DistrictIndex::from_path(&work.records, work.format)?;
    let bridge = SelectionBridge::new(&index, work.formatter());

    match matches.subcommand() {
        ("summary", Some(_)) => print_summary(&work, &index)?,
        ("district", Some(m)) => {
            let district = DistrictId::from(m.value_of("district").unwrap_or_default());
            let selection = selection_for(&work, district)?;
            let view = bridge.on_select(Some(&selection))?;
            if m.is_present("json") {
                match serde_json::to_string_pretty(&view) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("unable to serialise district view: {}", e);
                        return Ok(1);
                    }
                }
            } else if let SelectionView::District(view) = &view {
                print_view(view);
            }
        }
        ("check", Some(_)) => {
            let problems = check(&work, &index)?;
            if problems > 0 {
                eprintln!("{} problems found", problems);
                return Ok(1);
            }
            println!("{} districts OK", index.len());
        }
        ("export", Some(m)) => {
            let dir = m.value_of("dir").unwrap_or("output");
            let written = electmap::output::export(&bridge, &work.description, Path::new(dir))?;
            println!("wrote {} files to {}", written.len(), dir);
        }
        _ => unreachable!(),
    }
    Ok(0)
}

fn main() {
    env_logger::init();

    let matches = App::new("electmap")
        .version(clap::crate_version!())
        .about("District election results for choropleth maps")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("configuration file")
                .takes_value(true)
                .default_value("electmap.toml"),
        )
        .subcommand(SubCommand::with_name("summary").about("print the chamber composition"))
        .subcommand(
            SubCommand::with_name("district")
                .about("print the results for one district")
                .arg(Arg::with_name("district").required(true).help("district identifier"))
                .arg(Arg::with_name("json").long("json").help("print the view model as JSON")),
        )
        .subcommand(SubCommand::with_name("check").about("validate results and map features"))
        .subcommand(
            SubCommand::with_name("export")
                .about("write every district view and the seat summary as JSON")
                .arg(Arg::with_name("dir").required(true).help("output directory")),
        )
        .get_matches();

    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
