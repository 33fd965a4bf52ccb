use criterion::{criterion_group, criterion_main, Criterion};
use syslog_rfc5424::parse_message;

const INPUTS: [(&str, &str); 3] = [
    ("minimal", "<1>1 - - - - - -"),
    (
        "cron",
        r#"<78>1 2016-01-15T00:04:01+00:00 host1 CROND 10391 - [meta sequenceId="29"] some_message"#,
    ),
    (
        "nat",
        r#"<134>1 2019-01-20T23:43:41.087236Z 172.16.3.1 NAT 15634 SADD [nsess SSUBIX="0" SVLAN="0" IATYP="IPv4" ISADDR="172.16.1.2" ISPORT="6303" XATYP="IPv4" XSADDR="10.0.0.3" XSPORT="16253" PROTO="6" XDADDR="172.16.2.2" XDPORT="80"] <type 'str'>"#,
    ),
];

fn parse(c: &mut Criterion) {
    for (name, input) in INPUTS {
        let mut group = c.benchmark_group(format!("parse/{name}"));

        group.bench_function("own", |b| {
            b.iter(|| {
                let _ = parse_message(input);
            })
        });

        group.bench_function("syslog_loose", |b| {
            b.iter(|| {
                let _ = syslog_loose::parse_message(input, syslog_loose::Variant::RFC5424);
            })
        });

        group.finish();
    }
}

fn encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, input) in INPUTS {
        let msg = parse_message(input).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = msg.to_wire();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, parse, encode);
criterion_main!(benches);
