use criterion::{black_box, criterion_group, criterion_main, Criterion};
use esfront_parser::parse;
use esfront_scanner::tokenize;

// A medium-size script (~80 lines) with various constructs
const SCRIPT_SOURCE: &str = r#"
// Store with listeners
class Store extends EventTarget {
    #state;
    static instances = 0;

    constructor(initial = {}) {
        super();
        this.#state = { ...initial };
        Store.instances++;
    }

    get state() {
        return this.#state;
    }

    update(patch) {
        const next = { ...this.#state, ...patch };
        for (const [key, value] of Object.entries(patch)) {
            if (value === undefined) delete next[key];
        }
        this.#state = next;
        this.dispatchEvent(new Event('change'));
    }

    static {
        Store.registry = new Map();
    }
}

function* range(start, end, step = 1) {
    for (let i = start; i < end; i += step) {
        yield i;
    }
}

async function load(url, { retries = 3, timeout } = {}) {
    let lastError;
    while (retries-- > 0) {
        try {
            const response = await fetch(url, { signal: timeout?.signal });
            return await response.json();
        } catch (error) {
            lastError = error;
        } finally {
            console.debug(`attempt finished for ${url}`);
        }
    }
    throw lastError ?? new Error('unreachable');
}

const total = [...range(0, 100)]
    .filter(n => n % 3 === 0 || n % 5 === 0)
    .reduce((sum, n) => sum + n, 0);

const pattern = /^(\d{3})-(\d{4})$/u;
var matched = pattern.test('555-1234') ? 'yes' : 'no';

outer: for (var row = 0; row < 10; row++) {
    for (var col = 0; col < 10; col++) {
        if (row * col > 50) break outer;
        if (col > row) continue outer;
    }
}

switch (typeof total) {
    case 'number':
        matched += total ** 2;
        break;
    default:
        matched = void 0;
}

({ a: matched, b: [, second = 2] = [] } = { a: 1 });
"#;

fn bench_parse_script(c: &mut Criterion) {
    c.bench_function("parse_script_medium", |b| {
        b.iter(|| {
            let program = parse(black_box(SCRIPT_SOURCE));
            black_box(program)
        });
    });
}

fn bench_tokenize_script(c: &mut Criterion) {
    c.bench_function("tokenize_script_medium", |b| {
        b.iter(|| black_box(tokenize(black_box(SCRIPT_SOURCE))));
    });
}

criterion_group!(benches, bench_parse_script, bench_tokenize_script);
criterion_main!(benches);
