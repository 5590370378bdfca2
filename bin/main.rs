//! The router daemon.
//!
//! Loads the static routing and ARP tables, opens one raw socket per named interface and
//! forwards frames until receiving fails. A failed transmit only costs the one packet; a failed
//! receive means the interfaces are gone and the process exits. Call example:
//!
//! * `nexthop rtable.txt arp_table.txt eth0,192.168.0.1 eth1,192.168.1.1`
use nexthop::config::{self, Opts};
use nexthop::layer::{arp, fwd, route};
use nexthop::nic::sys::Bundle;
use nexthop::nic::{Device, Frame};

/// Diagnostics go to standard error, unfiltered.
struct StderrLog;

static LOGGER: StderrLog = StderrLog;

impl log::Log for StderrLog {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!("{}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

fn main() {
    log::set_logger(&LOGGER)
        .expect("no other logger can have been installed yet");
    log::set_max_level(log::LevelFilter::Trace);

    let opts = Opts::from_args();

    let routes = config::load_routes(&opts.routes)
        .unwrap_or_else(|err| fatal("routing table", &err));
    let neighbors = config::load_neighbors(&opts.neighbors)
        .unwrap_or_else(|err| fatal("arp table", &err));

    let routes = route::Table::new(routes);
    let neighbors = arp::Table::new(neighbors);

    let mut device = Bundle::open(
            opts.interfaces.iter().map(|iface| (iface.name.as_str(), iface.address)))
        .unwrap_or_else(|err| fatal("interfaces", &std::io::Error::from(err)));

    let addresses = device.addresses().to_vec();
    let router = fwd::Router::new(&routes, &neighbors, &addresses);

    let mut frame = Frame::new();
    loop {
        if device.receive(&mut frame).is_err() {
            let err = device.last_err()
                .map(std::io::Error::from)
                .unwrap_or_else(|| std::io::Error::from(std::io::ErrorKind::Other));
            fatal("receive", &err)
        }

        // Per-packet failures, a rejected transmit included, only cost this one packet.
        if let Err(err) = router.process(&mut frame, &mut device) {
            match device.last_err() {
                Some(os) => log::debug!("transmit failed, packet lost: {}",
                    std::io::Error::from(os)),
                None => log::debug!("transmit failed, packet lost: {}", err),
            }
        }
    }
}

fn fatal(what: &str, err: &dyn std::fmt::Display) -> ! {
    eprintln!("{}: {}", what, err);
    std::process::exit(1);
}
