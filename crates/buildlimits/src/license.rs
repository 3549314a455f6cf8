//! License headers for generated files.

use anyhow::bail;

const ELASTIC: &str = "\
// Copyright Elasticsearch B.V. and/or licensed to Elasticsearch B.V. under one
// or more contributor license agreements. Licensed under the Elastic License;
// you may not use this file except in compliance with the Elastic License.";

const ELASTIC_V2: &str = "\
// Copyright Elasticsearch B.V. and/or licensed to Elasticsearch B.V. under one
// or more contributor license agreements. Licensed under the Elastic License 2.0;
// you may not use this file except in compliance with the Elastic License 2.0.";

const ASL2: &str = "\
// Licensed to Elasticsearch B.V. under one or more contributor
// license agreements. See the NOTICE file distributed with
// this work for additional information regarding copyright
// ownership. Elasticsearch B.V. licenses this file to you under
// the Apache License, Version 2.0 (the \"License\"); you may
// not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// \"AS IS\" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.";

const ASL2_SHORT: &str = "\
// Licensed to Elasticsearch B.V. under one or more agreements.
// Elasticsearch B.V. licenses this file to you under the Apache 2.0 License.
// See the LICENSE file in the project root for more information.";

const KNOWN: &[(&str, &str)] = &[
    ("Elastic", ELASTIC),
    ("Elasticv2", ELASTIC_V2),
    ("ASL2", ASL2),
    ("ASL2-Short", ASL2_SHORT),
    ("None", ""),
];

/// Look up a header by name (case-insensitive). `None` yields an empty header.
pub fn find(name: &str) -> anyhow::Result<&'static str> {
    match KNOWN.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        Some((_, header)) => Ok(*header),
        None => {
            let names: Vec<&str> = KNOWN.iter().map(|(n, _)| *n).collect();
            bail!("unknown license {name:?} (known: {})", names.join(", "))
        }
    }
}
